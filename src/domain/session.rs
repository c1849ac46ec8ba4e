use tokio::sync::watch;

use super::{AnalysisResult, Document, PipelineState};

pub const NOTES_FILENAME: &str = "article_notes.txt";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("an analysis pass is already in progress")]
    PassInFlight,
    #[error("no analysis available: analyze an article before exporting")]
    NoAnalysisAvailable,
    #[error("analysis result does not belong to the current document")]
    StaleResult,
}

/// Free-form notes the user keeps alongside the current session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionNotes(String);

impl SessionNotes {
    pub fn set(&mut self, text: impl Into<String>) {
        self.0 = text.into();
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Session-scoped state carried across user interactions.
///
/// The current [`AnalysisResult`] is only exposed for export while the
/// session is `Aggregated` and the result belongs to the current document.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    state: PipelineState,
    document: Option<Document>,
    result: Option<AnalysisResult>,
    analysis_completed: bool,
    last_error: Option<String>,
    notes: SessionNotes,
    state_tx: Option<watch::Sender<PipelineState>>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that publishes every state transition, so readers can see
    /// the stage of a running pass without taking the session.
    pub fn observed() -> (Self, watch::Receiver<PipelineState>) {
        let (tx, rx) = watch::channel(PipelineState::Idle);
        let session = Self {
            state_tx: Some(tx),
            ..Self::default()
        };
        (session, rx)
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        if self.analysis_completed {
            self.result.as_ref()
        } else {
            None
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn notes(&self) -> &SessionNotes {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut SessionNotes {
        &mut self.notes
    }

    /// Starts a new pass, discarding the previous document and result.
    pub fn begin_pass(&mut self) -> Result<(), SessionError> {
        if self.state.is_in_flight() || self.state == PipelineState::Exporting {
            return Err(SessionError::PassInFlight);
        }
        self.document = None;
        self.result = None;
        self.analysis_completed = false;
        self.last_error = None;
        self.enter(PipelineState::Ingesting);
        Ok(())
    }

    pub fn enter(&mut self, state: PipelineState) {
        tracing::debug!(from = %self.state, to = %state, "Pipeline state transition");
        self.state = state;
        if let Some(tx) = &self.state_tx {
            tx.send_replace(state);
        }
    }

    pub fn set_document(&mut self, document: Document) {
        self.document = Some(document);
    }

    pub fn fail_pass(&mut self, reason: impl Into<String>) {
        self.result = None;
        self.analysis_completed = false;
        self.last_error = Some(reason.into());
        self.enter(PipelineState::Idle);
    }

    pub fn complete_pass(&mut self, result: AnalysisResult) -> Result<(), SessionError> {
        let belongs_to_current = self
            .document
            .as_ref()
            .is_some_and(|doc| doc.id == result.document_id);
        if !belongs_to_current {
            self.fail_pass(SessionError::StaleResult.to_string());
            return Err(SessionError::StaleResult);
        }
        self.result = Some(result);
        self.analysis_completed = true;
        self.enter(PipelineState::Aggregated);
        Ok(())
    }

    /// Moves to `Exporting` and hands out the result to render.
    pub fn begin_export(&mut self) -> Result<AnalysisResult, SessionError> {
        if self.state != PipelineState::Aggregated || !self.analysis_completed {
            return Err(SessionError::NoAnalysisAvailable);
        }
        let (Some(document), Some(result)) = (&self.document, &self.result) else {
            return Err(SessionError::NoAnalysisAvailable);
        };
        if document.id != result.document_id {
            return Err(SessionError::StaleResult);
        }
        let snapshot = result.clone();
        self.enter(PipelineState::Exporting);
        Ok(snapshot)
    }

    /// Returns to `Aggregated` whether or not the export succeeded.
    pub fn finish_export(&mut self) {
        if self.state == PipelineState::Exporting {
            self.enter(PipelineState::Aggregated);
        }
    }

    /// Clears everything except the notes.
    pub fn reset(&mut self) {
        self.document = None;
        self.result = None;
        self.analysis_completed = false;
        self.last_error = None;
        self.enter(PipelineState::Idle);
    }
}
