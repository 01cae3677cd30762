pub mod health;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::evaluation::handlers as evaluation;
use crate::history::handlers as history;
use crate::state::AppState;

/// Upper bound on a multipart request (JD plus every resume in a batch).
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring
        .route("/api/v1/evaluate", post(evaluation::handle_evaluate))
        .route("/api/v1/analyze-bulk", post(evaluation::handle_analyze_bulk))
        .route("/api/v1/feedback", post(evaluation::handle_feedback))
        // History
        .route("/api/v1/jobs", get(history::handle_list_jobs))
        .route(
            "/api/v1/results/*job_description",
            get(history::handle_results_for_job),
        )
        .route("/api/v1/history", delete(history::handle_clear_history))
        .route(
            "/api/v1/history/*job_description",
            delete(history::handle_clear_job_history),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Permissive when no origins are configured, otherwise restricted to the list.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    if allowed_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("Invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}
