//! HTTP request handlers

use super::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tera::Context;
use tracing::{info_span, Instrument};
use uuid::Uuid;

/// Query the search page runs when opened without one
pub const DEFAULT_QUERY: &str = "why is sora 2 good";

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search query
    pub q: Option<String>,
}

/// JSON search API
pub async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let request_id = Uuid::new_v4();
    let raw_query = params.q.unwrap_or_default();

    let response = state
        .search
        .execute(&raw_query)
        .instrument(info_span!("search", %request_id))
        .await;

    ([(header::CACHE_CONTROL, "no-store")], Json(response)).into_response()
}

/// Search page: form plus server-rendered results
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.unwrap_or_else(|| DEFAULT_QUERY.to_string());

    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("version", crate::VERSION);
    ctx.insert("query", &query);

    if !query.trim().is_empty() {
        let request_id = Uuid::new_v4();
        let response = state
            .search
            .execute(&query)
            .instrument(info_span!("search_page", %request_id))
            .await;
        ctx.insert("response", &response);
    }

    match state.templates.render_with_context("index.html", &ctx) {
        Ok(html) => ([(header::CACHE_CONTROL, "no-store")], Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "engines": state
            .registry
            .engines()
            .iter()
            .map(|e| serde_json::json!({
                "name": e.name(),
                "source": e.source(),
                "about": e.about(),
            }))
            .collect::<Vec<_>>(),
    }))
}
