use std::path::Path;

use serde::de::DeserializeOwned;

use crate::application::ports::ModelInferenceError;

/// Reads a JSON model artifact exported by the training pipeline.
pub fn load_json_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ModelInferenceError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ModelInferenceError::ModelLoadFailed(format!("{}: {}", path.display(), e))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        ModelInferenceError::ModelLoadFailed(format!("{}: {}", path.display(), e))
    })
}
