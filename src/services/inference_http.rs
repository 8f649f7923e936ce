use async_trait::async_trait;
use reqwest::Client;
use std::error::Error as _;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::AppError;
use crate::models::types::InferencePayload;
use crate::services::settings::InferenceConfig;
use crate::traits::inference_api::{InferenceApi, InferenceError};

/// Sends generation requests to a hosted inference endpoint over HTTP(S).
pub struct HttpInferenceApi {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl HttpInferenceApi {
    /// Builds the transport from config and an already-resolved API key.
    pub fn from_config(cfg: &InferenceConfig, api_key: Option<String>) -> Result<Self, AppError> {
        let mut client = Client::builder();
        if let Some(secs) = cfg.request_timeout_secs {
            client = client.timeout(Duration::from_secs(secs));
        }
        let endpoint = cfg.endpoint_url()?;
        if api_key.is_none() {
            warn!(
                api_key_env = %cfg.api_key_env,
                "no API key resolved; requests will carry an empty bearer token"
            );
        }
        Ok(Self {
            client: client.build()?,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl InferenceApi for HttpInferenceApi {
    async fn generate(
        &self,
        payload: &InferencePayload<'_>,
    ) -> Result<serde_json::Value, InferenceError> {
        info!(url = %self.endpoint, inputs_len = payload.inputs.len(), "inference: POST");
        let res = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_deref().unwrap_or_default())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "inference: transport error");
                InferenceError::Transport(error_chain(&e))
            })?;

        let status = res.status();
        if !status.is_success() {
            let url = res.url().to_string();
            let body = res.text().await.unwrap_or_default();
            warn!(status = %status, body_len = body.len(), "inference: non-success status");
            return Err(InferenceError::Status { status, url });
        }

        let text = res
            .text()
            .await
            .map_err(|e| InferenceError::Transport(error_chain(&e)))?;
        debug!(status = %status, body_len = text.len(), "inference: response received");
        serde_json::from_str(&text).map_err(|e| InferenceError::Decode(e.to_string()))
    }

    fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

/// Joins an error with its sources, e.g. `error sending request ...: connection refused`.
fn error_chain(err: &reqwest::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !out.contains(&cause_text) {
            out.push_str(": ");
            out.push_str(&cause_text);
        }
        source = cause.source();
    }
    out
}
