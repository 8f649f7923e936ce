use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::models::types::InferencePayload;

/// Failure of a single text-generation call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// The endpoint answered with a non-2xx status. The body is deliberately not kept.
    #[error("{status} for url: {url}")]
    Status { status: StatusCode, url: String },

    #[error("{0}")]
    Transport(String),

    #[error("invalid JSON in response body: {0}")]
    Decode(String),
}

/// Defines the interface for a hosted text-generation endpoint.
///
/// The analyzer only ever talks to this trait, so tests can swap in a stub
/// transport and the production build uses [`crate::services::inference_http::HttpInferenceApi`].
#[async_trait]
pub trait InferenceApi: Send + Sync {
    /// Sends one generation request and returns the parsed JSON body of a 2xx response.
    async fn generate(
        &self,
        payload: &InferencePayload<'_>,
    ) -> Result<serde_json::Value, InferenceError>;

    /// Endpoint description used in log lines.
    fn endpoint(&self) -> &str;
}
