use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One persisted evaluation of a resume against a job description.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisResultRow {
    pub id: i64,
    pub job_description: String,
    pub resume_filename: String,
    pub final_score: f64,
    pub verdict: String,
    pub identified_skills: Vec<String>,
    pub found_skills: Vec<String>,
    pub analysis_timestamp: DateTime<Utc>,
}
