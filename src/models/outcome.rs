use std::fmt;

use reqwest::StatusCode;
use strum::IntoStaticStr;

pub const BLANK_ENTRY_MESSAGE: &str = "⚠ Please enter a journal entry.";
pub const UNEXPECTED_FORMAT_MESSAGE: &str = "⚠ Unexpected response format from model.";

/// Result of analyzing one journal entry.
///
/// Every variant renders to a displayable string through `Display`; callers that
/// need to branch should match on the variant instead of inspecting the text.
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum AnalysisOutcome {
    /// Generated text, trimmed of surrounding whitespace.
    Analysis(String),
    /// The entry was blank; no request was sent.
    BlankEntry,
    /// The endpoint answered with a non-2xx status.
    HttpFailure { status: StatusCode, url: String },
    /// Network failure, unreadable body, invalid JSON or any other unexpected error.
    TransportFailure { detail: String },
    /// Valid JSON that does not look like `[{"generated_text": "..."}]`.
    UnexpectedFormat,
}

impl AnalysisOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisOutcome::Analysis(_))
    }

    /// Snake-case variant name, used in logs and the JSON API.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for AnalysisOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisOutcome::Analysis(text) => f.write_str(text),
            AnalysisOutcome::BlankEntry => f.write_str(BLANK_ENTRY_MESSAGE),
            AnalysisOutcome::HttpFailure { status, url } => {
                write!(f, "❌ HTTP error: {} for url: {}", status, url)
            }
            AnalysisOutcome::TransportFailure { detail } => {
                write!(f, "❌ Error during analysis: {}", detail)
            }
            AnalysisOutcome::UnexpectedFormat => f.write_str(UNEXPECTED_FORMAT_MESSAGE),
        }
    }
}
