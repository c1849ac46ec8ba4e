mod analysis_result;
mod document;
mod document_id;
mod entity;
mod export_request;
mod fake_news;
mod normalized_text;
mod pipeline_state;
mod sentiment;
mod session;
mod source_input;
mod topic;
mod video_id;

pub use analysis_result::{AnalysisResult, Facet, FacetOutcome};
pub use document::{Document, SourceLanguage, SourceModality};
pub use document_id::DocumentId;
pub use entity::{Entity, EntitySet};
pub use export_request::{
    ExportRequest, ReportFilename, ReportFilenameError, UNAVAILABLE_PLACEHOLDER,
};
pub use fake_news::{FakeNewsVerdict, NewsLabel};
pub use normalized_text::NormalizedText;
pub use pipeline_state::PipelineState;
pub use sentiment::Sentiment;
pub use session::{AnalysisSession, NOTES_FILENAME, SessionError, SessionNotes};
pub use source_input::SourceInput;
pub use topic::{Topic, TopicKeyword};
pub use video_id::{InvalidVideoUrl, VideoId};
