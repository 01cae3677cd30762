use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::history::{clear_all, clear_job, list_jobs, results_for_job};
use crate::models::analysis::AnalysisResultRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub status: &'static str,
    pub message: String,
}

impl StatusMessage {
    fn cleared(deleted: u64, scope: Option<&str>) -> Self {
        let message = match scope {
            Some(job) => format!("Deleted {deleted} result(s) for job '{job}'"),
            None => format!("Deleted {deleted} result(s) from history"),
        };
        Self {
            status: "success",
            message,
        }
    }
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(list_jobs(&state.db).await?))
}

/// GET /api/v1/results/*job_description
pub async fn handle_results_for_job(
    State(state): State<AppState>,
    Path(job_description): Path<String>,
) -> Result<Json<Vec<AnalysisResultRow>>, AppError> {
    Ok(Json(results_for_job(&state.db, &job_description).await?))
}

/// DELETE /api/v1/history
pub async fn handle_clear_history(
    State(state): State<AppState>,
) -> Result<Json<StatusMessage>, AppError> {
    let deleted = clear_all(&state.db).await?;
    info!("Cleared analysis history ({deleted} rows)");
    Ok(Json(StatusMessage::cleared(deleted, None)))
}

/// DELETE /api/v1/history/*job_description
pub async fn handle_clear_job_history(
    State(state): State<AppState>,
    Path(job_description): Path<String>,
) -> Result<Json<StatusMessage>, AppError> {
    let deleted = clear_job(&state.db, &job_description).await?;
    info!("Cleared history for '{job_description}' ({deleted} rows)");
    Ok(Json(StatusMessage::cleared(deleted, Some(&job_description))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleared_message_names_scope() {
        let all = StatusMessage::cleared(3, None);
        assert_eq!(all.status, "success");
        assert_eq!(all.message, "Deleted 3 result(s) from history");

        let one = StatusMessage::cleared(0, Some("jd.pdf"));
        assert_eq!(one.message, "Deleted 0 result(s) for job 'jd.pdf'");
    }
}
