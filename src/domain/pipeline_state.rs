use std::fmt;

/// Stage of the analysis state machine for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Ingesting,
    Translating,
    Analyzing,
    Aggregated,
    Exporting,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Idle => "IDLE",
            PipelineState::Ingesting => "INGESTING",
            PipelineState::Translating => "TRANSLATING",
            PipelineState::Analyzing => "ANALYZING",
            PipelineState::Aggregated => "AGGREGATED",
            PipelineState::Exporting => "EXPORTING",
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            PipelineState::Ingesting | PipelineState::Translating | PipelineState::Analyzing
        )
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
