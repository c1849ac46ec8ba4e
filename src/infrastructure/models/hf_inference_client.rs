use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::application::ports::ModelInferenceError;

/// Minimal client for a Hugging Face Inference API compatible server:
/// `POST {base_url}/models/{model}` with `{"inputs", "parameters"}`.
pub struct HfInferenceClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: serde_json::Value,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

impl HfInferenceClient {
    pub fn new(
        base_url: &str,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ModelInferenceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModelInferenceError::ModelLoadFailed(format!("http client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.filter(|t| !t.is_empty()),
        })
    }

    #[tracing::instrument(skip(self, inputs, parameters), fields(chars = inputs.len()))]
    pub async fn infer<T: DeserializeOwned>(
        &self,
        model: &str,
        inputs: &str,
        parameters: serde_json::Value,
    ) -> Result<T, ModelInferenceError> {
        let body = InferenceRequest {
            inputs,
            parameters,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut request = self
            .client
            .post(format!("{}/models/{}", self.base_url, model))
            .json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ModelInferenceError::ApiRequestFailed(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(ModelInferenceError::ApiRequestFailed(
                    "rate limited by inference server".to_string(),
                ));
            }
            StatusCode::SERVICE_UNAVAILABLE => {
                return Err(ModelInferenceError::ModelLoadFailed(format!(
                    "model {model} is not loaded on the inference server"
                )));
            }
            status => {
                let text = response.text().await.unwrap_or_default();
                return Err(ModelInferenceError::ApiRequestFailed(format!(
                    "HTTP {}: {}",
                    status, text
                )));
            }
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ModelInferenceError::InvalidResponse(e.to_string()))
    }
}
