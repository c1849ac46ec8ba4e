use std::sync::Arc;

use tokio::sync::{Mutex, watch};

use crate::application::services::AnalysisOrchestrator;
use crate::domain::{AnalysisSession, PipelineState};
use crate::presentation::config::Settings;

/// Shared handler state. One analysis session per running service.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<AnalysisOrchestrator>,
    pub session: Arc<Mutex<AnalysisSession>>,
    pub settings: Arc<Settings>,
    pipeline: watch::Receiver<PipelineState>,
}

impl AppState {
    pub fn new(orchestrator: Arc<AnalysisOrchestrator>, settings: Settings) -> Self {
        let (session, pipeline) = AnalysisSession::observed();
        Self {
            orchestrator,
            session: Arc::new(Mutex::new(session)),
            settings: Arc::new(settings),
            pipeline,
        }
    }

    /// Latest session state, readable while a pass holds the session.
    pub fn pipeline_state(&self) -> PipelineState {
        *self.pipeline.borrow()
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.settings.server.max_upload_mb.saturating_mul(1024 * 1024)
    }
}
