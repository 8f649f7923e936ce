use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Raw diary text submitted by the user. May be empty or whitespace-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, From, Into, Display, AsRef)]
#[from(String, &str)]
pub struct JournalEntry(String);

impl JournalEntry {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when nothing but whitespace was entered.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Sampling parameters sent alongside the prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub temperature: f64,
    pub max_new_tokens: u32,
    /// `false` asks the endpoint for the completion only, without echoing the prompt.
    pub return_full_text: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_new_tokens: 500,
            return_full_text: false,
        }
    }
}

/// Request body of a text-generation call.
#[derive(Debug, Serialize)]
pub struct InferencePayload<'a> {
    pub inputs: &'a str,
    pub parameters: &'a GenerationParameters,
}

/// One element of the array returned by the endpoint. Other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationCandidate {
    pub generated_text: String,
}
