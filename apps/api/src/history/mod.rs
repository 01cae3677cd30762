//! Analysis history: every evaluation is stored so past rankings can be
//! reviewed per job description and cleared.

pub mod handlers;

use sqlx::PgPool;
use tracing::info;

use crate::models::analysis::AnalysisResultRow;
use crate::scoring::MatchResult;

/// Parameters for recording one scored resume.
pub struct NewAnalysis<'a> {
    pub job_description: &'a str,
    pub resume_filename: &'a str,
    pub identified_skills: &'a [String],
    pub result: &'a MatchResult,
}

/// Creates the history table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS analysis_results (
            id                  BIGSERIAL PRIMARY KEY,
            job_description     TEXT NOT NULL,
            resume_filename     TEXT NOT NULL,
            final_score         DOUBLE PRECISION NOT NULL,
            verdict             TEXT NOT NULL,
            identified_skills   TEXT[] NOT NULL DEFAULT '{}',
            found_skills        TEXT[] NOT NULL DEFAULT '{}',
            analysis_timestamp  TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS analysis_results_job_idx ON analysis_results (job_description)",
    )
    .execute(pool)
    .await?;

    info!("analysis_results table ready");
    Ok(())
}

/// Inserts one analysis row and returns its id.
pub async fn record_analysis(pool: &PgPool, analysis: NewAnalysis<'_>) -> Result<i64, sqlx::Error> {
    let NewAnalysis {
        job_description,
        resume_filename,
        identified_skills,
        result,
    } = analysis;

    sqlx::query_scalar(
        r#"
        INSERT INTO analysis_results
            (job_description, resume_filename, final_score, verdict,
             identified_skills, found_skills)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(job_description)
    .bind(resume_filename)
    .bind(result.final_score)
    .bind(result.verdict.as_str())
    .bind(identified_skills)
    .bind(&result.found_skills)
    .fetch_one(pool)
    .await
}

/// Distinct job descriptions that have at least one stored result.
pub async fn list_jobs(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT DISTINCT job_description FROM analysis_results ORDER BY job_description",
    )
    .fetch_all(pool)
    .await
}

/// All stored results for one job description, best first.
pub async fn results_for_job(
    pool: &PgPool,
    job_description: &str,
) -> Result<Vec<AnalysisResultRow>, sqlx::Error> {
    sqlx::query_as::<_, AnalysisResultRow>(
        r#"
        SELECT * FROM analysis_results
        WHERE job_description = $1
        ORDER BY final_score DESC, id ASC
        "#,
    )
    .bind(job_description)
    .fetch_all(pool)
    .await
}

/// Deletes every stored result. Returns the number of rows removed.
pub async fn clear_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let done = sqlx::query("DELETE FROM analysis_results")
        .execute(pool)
        .await?;
    Ok(done.rows_affected())
}

/// Deletes the stored results of one job description.
pub async fn clear_job(pool: &PgPool, job_description: &str) -> Result<u64, sqlx::Error> {
    let done = sqlx::query("DELETE FROM analysis_results WHERE job_description = $1")
        .bind(job_description)
        .execute(pool)
        .await?;
    Ok(done.rows_affected())
}
