//! HTTP request handlers

use super::error::ApiError;
use super::state::AppState;
use crate::results::{SearchResult, UnresponsiveEngine};
use crate::search::{SearchQuery, SearchRequest};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Search results response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Results in the order the quality service returned them
    pub results: Vec<SearchResult>,
    pub suggestions: Vec<String>,
    /// Seconds spent on the whole request
    pub search_time: f64,
    /// Length of `results`
    pub total_results: usize,
    /// Engines that failed or timed out; omitted when all answered
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresponsive_engines: Vec<UnresponsiveEngine>,
}

/// Search handler
///
/// The body is parsed by hand so that any malformed payload maps to 400,
/// whatever its content type.
pub async fn search(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let span = info_span!("search", request_id = %Uuid::new_v4());
    run_search(state, body).instrument(span).await
}

async fn run_search(state: AppState, body: Bytes) -> Result<Response, ApiError> {
    let request: SearchRequest = serde_json::from_slice(&body).map_err(ApiError::InvalidJson)?;
    let query = SearchQuery::normalize(request, &state.settings.search)?;

    let start = Instant::now();

    let dispatch = state.dispatcher.dispatch(&query).await;
    let refined = state
        .quality
        .refine(&query.query, &dispatch.results)
        .await?;

    let response = SearchResponse {
        total_results: refined.results.len(),
        results: refined.results,
        suggestions: refined.suggestions,
        search_time: start.elapsed().as_secs_f64(),
        unresponsive_engines: dispatch.unresponsive,
    };

    info!(
        "Search '{}' answered with {} results in {:.3}s",
        query.query, response.total_results, response.search_time
    );

    let mut bytes = serde_json::to_vec_pretty(&response).map_err(ApiError::Encode)?;
    bytes.push(b'\n');

    Ok(([(header::CONTENT_TYPE, "application/json")], bytes).into_response())
}

/// Rejects every method other than POST on the search endpoint
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        "method not allowed\n",
    )
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
