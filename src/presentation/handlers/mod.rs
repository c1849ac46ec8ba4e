mod analysis;
pub mod dto;
mod export;
mod health;
mod notes;
mod session;
mod upload;

pub use analysis::{AnalyzeRequest, SourceKind, SourceRequest, analyze_handler, current_analysis_handler};
pub use export::{ExportBody, ExportResponse, export_handler};
pub use health::health_handler;
pub use notes::{NotesBody, download_notes_handler, get_notes_handler, put_notes_handler};
pub use session::{SessionResponse, reset_session_handler, session_handler};
pub use upload::upload_handler;
