//! Evaluation workflows: one resume against one JD, and bulk ranking of many
//! resumes against one JD.
//!
//! Flow: extract JD text → extract required skills → extract resume text →
//!       MatchPipeline (hard → semantic → combine).

pub mod bulk;
pub mod handlers;

use std::sync::Arc;

use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::extraction::{extract_source, DocumentSource, ExtractionError, TextExtractor};
use crate::scoring::{MatchPipeline, MatchResult, SkillList};
use crate::skills::{extract_required_skills, SkillExtractor};

/// Why a single (JD, resume) evaluation failed.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
}

/// Result of a single evaluation, with the skills it was scored against.
#[derive(Debug, Clone)]
pub struct SingleEvaluation {
    pub required_skills: SkillList,
    pub result: MatchResult,
}

/// Scores one resume against one job description. Every failure surfaces.
pub async fn evaluate_single(
    pipeline: &MatchPipeline,
    extractor: Arc<dyn TextExtractor>,
    skill_extractor: &dyn SkillExtractor,
    jd: DocumentSource,
    resume: DocumentSource,
) -> Result<SingleEvaluation, AnalysisError> {
    let jd_text = extract_source(Arc::clone(&extractor), jd).await?;
    let resume_text = extract_source(extractor, resume).await?;
    let required_skills = extract_required_skills(skill_extractor, &jd_text).await;
    let result = pipeline
        .evaluate(&jd_text, &resume_text, &required_skills)
        .await?;

    Ok(SingleEvaluation {
        required_skills,
        result,
    })
}
