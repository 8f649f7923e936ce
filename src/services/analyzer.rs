use std::sync::Arc;

use bon::Builder;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::models::outcome::AnalysisOutcome;
use crate::models::types::{
    GenerationCandidate, GenerationParameters, InferencePayload, JournalEntry,
};
use crate::services::prompt::PromptBuilder;
use crate::traits::inference_api::{InferenceApi, InferenceError};

const DEFAULT_PREVIEW_CHARS: usize = 200;

/// Turns a journal entry into an emotional analysis via one inference call.
///
/// Holds no per-call state: the same entry against a deterministic transport
/// always yields the same outcome.
#[derive(Builder)]
pub struct JournalAnalyzer {
    inference: Arc<dyn InferenceApi>,
    prompt: PromptBuilder,
    #[builder(default)]
    parameters: GenerationParameters,
    preview_chars: Option<usize>,
}

impl JournalAnalyzer {
    /// Analyzes one entry. Never fails: every path ends in a displayable outcome.
    pub async fn analyze(&self, entry: &str) -> AnalysisOutcome {
        let entry = JournalEntry::from(entry);
        if entry.is_blank() {
            info!("analyze: blank entry, skipping inference");
            return AnalysisOutcome::BlankEntry;
        }

        let prompt = match self.prompt.build(entry.as_str()) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "analyze: prompt render failed");
                return AnalysisOutcome::TransportFailure {
                    detail: e.to_string(),
                };
            }
        };
        info!(
            entry_len = entry.as_str().len(),
            prompt_len = prompt.len(),
            prompt_preview = %self.preview(&prompt),
            endpoint = %self.inference.endpoint(),
            "analyze: calling inference"
        );

        let payload = InferencePayload {
            inputs: &prompt,
            parameters: &self.parameters,
        };
        let outcome = match self.inference.generate(&payload).await {
            Ok(body) => match extract_generated_text(&body) {
                Some(text) => {
                    info!(
                        response_len = text.len(),
                        response_preview = %self.preview(&text),
                        "analyze: inference returned"
                    );
                    AnalysisOutcome::Analysis(text)
                }
                None => {
                    warn!(body = %body, "analyze: unexpected response shape");
                    AnalysisOutcome::UnexpectedFormat
                }
            },
            Err(InferenceError::Status { status, url }) => {
                AnalysisOutcome::HttpFailure { status, url }
            }
            Err(e) => AnalysisOutcome::TransportFailure {
                detail: e.to_string(),
            },
        };
        info!(outcome = outcome.kind(), "analyze: done");
        outcome
    }

    /// String form of [`analyze`](Self::analyze), ready for display.
    pub async fn analyze_to_text(&self, entry: &str) -> String {
        self.analyze(entry).await.to_string()
    }

    fn preview(&self, text: &str) -> String {
        let n = self.preview_chars.unwrap_or(DEFAULT_PREVIEW_CHARS);
        text.chars().take(n).collect()
    }
}

/// Pulls `generated_text` from the first element of a `[{...}, ...]` body.
///
/// Only the first candidate is surfaced; anything else (object at the top level,
/// empty array, missing or non-string field) yields `None`.
pub fn extract_generated_text(body: &serde_json::Value) -> Option<String> {
    let candidates = body.as_array()?;
    debug!(candidates = candidates.len(), "inference: candidates received");
    let first = candidates.first()?;
    let candidate = GenerationCandidate::deserialize(first).ok()?;
    Some(candidate.generated_text.trim().to_string())
}
