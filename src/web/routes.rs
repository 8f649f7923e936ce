use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::Html,
};
use serde::{Deserialize, Serialize};
use tera::Context;

use super::{AppState, INDEX_TEMPLATE};

#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    #[serde(default)]
    pub entry: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub kind: String,
    pub result: String,
}

/// GET / - empty form.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, (StatusCode, String)> {
    render_page(&state, "", None)
}

/// POST /analyze - form submission, re-renders the page with the result.
pub async fn analyze_form(
    State(state): State<AppState>,
    Form(req): Form<EntryRequest>,
) -> Result<Html<String>, (StatusCode, String)> {
    let result = state.analyzer.analyze_to_text(&req.entry).await;
    render_page(&state, &req.entry, Some(&result))
}

/// POST /api/analyze - JSON variant. Always 200; the outcome kind says what happened.
pub async fn analyze_json(
    State(state): State<AppState>,
    Json(req): Json<EntryRequest>,
) -> Json<AnalyzeResponse> {
    let outcome = state.analyzer.analyze(&req.entry).await;
    Json(AnalyzeResponse {
        kind: outcome.kind().to_string(),
        result: outcome.to_string(),
    })
}

fn render_page(
    state: &AppState,
    entry: &str,
    result: Option<&str>,
) -> Result<Html<String>, (StatusCode, String)> {
    let mut ctx = Context::new();
    ctx.insert("title", &state.page.title);
    ctx.insert("description", &state.page.description);
    ctx.insert("entry", entry);
    ctx.insert("submitted", &result.is_some());
    ctx.insert("result", result.unwrap_or_default());
    state
        .pages
        .render(INDEX_TEMPLATE, &ctx)
        .map(Html)
        .map_err(|e| {
            tracing::error!(error = %e, "page render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
}
