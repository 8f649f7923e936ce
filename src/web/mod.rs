//! Web form front-end.
//!
//! Axum server with one HTML form and a JSON endpoint, both backed by
//! [`JournalAnalyzer`].

pub mod routes;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tera::Tera;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::AppError;
use crate::services::analyzer::JournalAnalyzer;
use crate::services::settings::WebConfig;

const INDEX_HTML: &str = include_str!("../../assets/web/index.html");
pub(crate) const INDEX_TEMPLATE: &str = "index.html";

/// State shared by every handler. Everything inside is immutable.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<JournalAnalyzer>,
    pub pages: Arc<Tera>,
    pub page: Arc<WebConfig>,
}

impl AppState {
    pub fn new(analyzer: Arc<JournalAnalyzer>, page: WebConfig) -> Result<Self, AppError> {
        let mut pages = Tera::default();
        // `.html` name turns on autoescaping for entry and result
        pages.add_raw_template(INDEX_TEMPLATE, INDEX_HTML)?;
        Ok(Self {
            analyzer,
            pages: Arc::new(pages),
            page: Arc::new(page),
        })
    }
}

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/analyze", post(routes::analyze_form))
        .route("/api/analyze", post(routes::analyze_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the web server until Ctrl-C.
pub async fn run_server(state: AppState, bind: &str) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("web form listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("web form stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
