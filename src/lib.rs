pub mod error;
pub mod models;
pub mod services;
pub mod traits;
pub mod web;

use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

pub use crate::error::AppError;
pub use crate::models::outcome::AnalysisOutcome;
pub use crate::models::types::JournalEntry;
pub use crate::services::analyzer::JournalAnalyzer;

use crate::services::inference_http::HttpInferenceApi;
use crate::services::prompt::PromptBuilder;
use crate::services::settings::{AppConfig, LoggingConfig};
use crate::traits::inference_api::InferenceApi;

/// File name prefix of the rolling log; the appender adds a date suffix.
pub const LOG_FILE_PREFIX: &str = "diary-analyzer.log";

/// Initialize structured logging. Console output goes to stderr so stdout only
/// carries analysis results; with `logging.directory` set, the same events are
/// also written to a daily rolling file. The returned guard must live as long as
/// the process when a log directory is configured.
pub fn init_logging(cfg: &LoggingConfig) -> Option<WorkerGuard> {
    let log_spec = std::env::var("RUST_LOG").unwrap_or_else(|_| cfg.level.clone());

    let (file_layer, guard) = match cfg.directory.as_ref() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .compact()
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(log_spec))
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init();
    guard
}

/// Wire the analyzer from config: resolve the API key once, compile the prompt
/// template and build the HTTP transport.
pub fn build_analyzer(cfg: &AppConfig) -> Result<JournalAnalyzer, AppError> {
    let api_key = cfg.inference.resolve_api_key();
    let inference: Arc<dyn InferenceApi> =
        Arc::new(HttpInferenceApi::from_config(&cfg.inference, api_key)?);
    let prompt = PromptBuilder::new(cfg.prompt.template.as_deref())?;
    Ok(JournalAnalyzer::builder()
        .inference(inference)
        .prompt(prompt)
        .parameters(cfg.inference.parameters())
        .maybe_preview_chars(cfg.inference.log_prompt_preview_chars)
        .build())
}

/// Analyze a single entry and return the text to show the user.
pub async fn analyze_entry(cfg: &AppConfig, entry: &JournalEntry) -> anyhow::Result<String> {
    let analyzer = build_analyzer(cfg)?;
    Ok(analyzer.analyze_to_text(entry.as_str()).await)
}

/// Serve the web form until Ctrl-C.
pub async fn serve(cfg: AppConfig, bind: Option<String>) -> anyhow::Result<()> {
    let analyzer = Arc::new(build_analyzer(&cfg)?);
    let bind = bind.unwrap_or_else(|| cfg.web.bind.clone());
    info!(%bind, endpoint = %cfg.inference.endpoint, "web mode starting");
    let state = web::AppState::new(analyzer, cfg.web)?;
    web::run_server(state, &bind).await
}
