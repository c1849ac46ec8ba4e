pub mod extraction;
pub mod models;
pub mod observability;
pub mod report;
pub mod translation;
