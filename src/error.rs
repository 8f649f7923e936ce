use thiserror::Error;

/// Startup and setup failures. Analysis itself never fails through this type,
/// see [`crate::models::outcome::AnalysisOutcome`].
#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid inference endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid prompt template: {0}")]
    Template(#[from] tera::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
