#[derive(Debug, thiserror::Error)]
pub enum ModelInferenceError {
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid model response: {0}")]
    InvalidResponse(String),
    #[error("inference timed out after {0} ms")]
    TimedOut(u64),
}
