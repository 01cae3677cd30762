use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::evaluation::bulk::{BulkEvaluator, ResumeSubmission};
use crate::evaluation::evaluate_single;
use crate::extraction::{extract_source, DocumentSource};
use crate::history::{record_analysis, NewAnalysis};
use crate::scoring::{MatchResult, SkillList, Verdict};
use crate::skills::{extract_required_skills, feedback_or_fallback};
use crate::state::AppState;

const JD_FIELD: &str = "jd_file";
const RESUME_FIELD: &str = "resume_file";
const BULK_RESUME_FIELD: &str = "resume_files";

// ────────────────────────────────────────────────────────────────────────────
// Multipart helpers
// ────────────────────────────────────────────────────────────────────────────

struct UploadedFile {
    field: String,
    filename: String,
    bytes: Bytes,
}

impl UploadedFile {
    fn into_source(self) -> DocumentSource {
        DocumentSource::Upload {
            filename: self.filename,
            bytes: self.bytes,
        }
    }
}

async fn collect_uploads(mut multipart: Multipart) -> Result<Vec<UploadedFile>, AppError> {
    let mut uploads = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let filename = field
            .file_name()
            .map(str::to_owned)
            .unwrap_or_else(|| name.clone());
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::Validation(format!("Uploaded file '{filename}' is empty")));
        }
        uploads.push(UploadedFile {
            field: name,
            filename,
            bytes,
        });
    }
    Ok(uploads)
}

fn take_one(uploads: &mut Vec<UploadedFile>, field: &str) -> Result<UploadedFile, AppError> {
    let index = uploads
        .iter()
        .position(|u| u.field == field)
        .ok_or_else(|| AppError::Validation(format!("Missing multipart field '{field}'")))?;
    Ok(uploads.remove(index))
}

fn take_all(uploads: Vec<UploadedFile>, field: &str) -> Vec<UploadedFile> {
    uploads.into_iter().filter(|u| u.field == field).collect()
}

fn percent(value: f64) -> String {
    format!("{value:.2}")
}

/// Stores a scored resume. History is best-effort: a failed insert is logged
/// and the caller still gets its result.
async fn persist(
    state: &AppState,
    job_description: &str,
    resume_filename: &str,
    identified_skills: &[String],
    result: &MatchResult,
) {
    let analysis = NewAnalysis {
        job_description,
        resume_filename,
        identified_skills,
        result,
    };
    if let Err(e) = record_analysis(&state.db, analysis).await {
        warn!("Failed to store analysis of '{resume_filename}' for '{job_description}': {e}");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// POST /api/v1/evaluate
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ScoreSummary {
    pub hard_match_percent: String,
    pub semantic_fit_percent: String,
    pub final_relevance_score: String,
    pub verdict: Verdict,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub identified_skills: SkillList,
    pub found_skills_in_resume: SkillList,
    pub scores: ScoreSummary,
}

/// POST /api/v1/evaluate
pub async fn handle_evaluate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EvaluateResponse>, AppError> {
    let mut uploads = collect_uploads(multipart).await?;
    let jd = take_one(&mut uploads, JD_FIELD)?;
    let resume = take_one(&mut uploads, RESUME_FIELD)?;
    let (jd_name, resume_name) = (jd.filename.clone(), resume.filename.clone());

    let evaluation = evaluate_single(
        &state.pipeline,
        Arc::clone(&state.extractor),
        state.skills.as_ref(),
        jd.into_source(),
        resume.into_source(),
    )
    .await?;

    info!(
        "Evaluated '{resume_name}' against '{jd_name}': {} ({})",
        evaluation.result.final_score, evaluation.result.verdict
    );
    persist(
        &state,
        &jd_name,
        &resume_name,
        &evaluation.required_skills,
        &evaluation.result,
    )
    .await;

    let result = evaluation.result;
    Ok(Json(EvaluateResponse {
        identified_skills: evaluation.required_skills,
        found_skills_in_resume: result.found_skills,
        scores: ScoreSummary {
            hard_match_percent: percent(result.hard_match_percent),
            semantic_fit_percent: percent(result.semantic_fit_percent),
            final_relevance_score: percent(result.final_score),
            verdict: result.verdict,
        },
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// POST /api/v1/analyze-bulk
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BulkResultItem {
    pub resume_filename: String,
    pub final_score: f64,
    pub verdict: Verdict,
    pub found_skills: SkillList,
    pub hard_match_percent: String,
    pub semantic_fit_percent: String,
}

#[derive(Debug, Serialize)]
pub struct BulkResponse {
    pub status: &'static str,
    pub results: Vec<BulkResultItem>,
}

/// POST /api/v1/analyze-bulk
pub async fn handle_analyze_bulk(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<BulkResponse>, AppError> {
    let mut uploads = collect_uploads(multipart).await?;
    let jd = take_one(&mut uploads, JD_FIELD)?;
    let resumes = take_all(uploads, BULK_RESUME_FIELD);
    if resumes.is_empty() {
        return Err(AppError::Validation(format!(
            "At least one '{BULK_RESUME_FIELD}' upload is required"
        )));
    }

    let jd_name = jd.filename.clone();
    let jd_text = extract_source(Arc::clone(&state.extractor), jd.into_source()).await?;
    let required_skills = extract_required_skills(state.skills.as_ref(), &jd_text).await;

    let submissions = resumes
        .into_iter()
        .map(|upload| ResumeSubmission {
            identifier: upload.filename.clone(),
            source: upload.into_source(),
        })
        .collect();

    let batch = BulkEvaluator::new(state.pipeline.clone(), Arc::clone(&state.extractor))
        .evaluate_batch(&jd_text, &required_skills, submissions)
        .await;

    for ranked in &batch.results {
        persist(
            &state,
            &jd_name,
            &ranked.resume_identifier,
            &required_skills,
            &ranked.result,
        )
        .await;
    }

    let results = batch
        .results
        .into_iter()
        .map(|ranked| BulkResultItem {
            resume_filename: ranked.resume_identifier,
            final_score: ranked.result.final_score,
            verdict: ranked.result.verdict,
            found_skills: ranked.result.found_skills,
            hard_match_percent: percent(ranked.result.hard_match_percent),
            semantic_fit_percent: percent(ranked.result.semantic_fit_percent),
        })
        .collect();

    Ok(Json(BulkResponse {
        status: batch.status,
        results,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// POST /api/v1/feedback
// ────────────────────────────────────────────────────────────────────────────

/// Clients also send `resume_text`; feedback is built from the skill lists
/// alone, so it is ignored like any other unknown field.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub jd_text: String,
    #[serde(default)]
    pub found_skills: SkillList,
    #[serde(default)]
    pub required_skills: SkillList,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}

/// POST /api/v1/feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    if req.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text must not be empty".to_string()));
    }
    let feedback = feedback_or_fallback(
        state.feedback.as_ref(),
        &req.jd_text,
        &req.required_skills,
        &req.found_skills,
    )
    .await;
    Ok(Json(FeedbackResponse { feedback }))
}
