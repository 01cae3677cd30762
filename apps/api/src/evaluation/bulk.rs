//! Ranks many resumes against one job description.
//!
//! Resumes are processed sequentially in submission order. A failure in one
//! resume's pipeline (extraction or embedding) is logged and that resume is left
//! out of the ranking; the batch itself always completes.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::evaluation::AnalysisError;
use crate::extraction::{extract_source, DocumentSource, TextExtractor};
use crate::scoring::{MatchPipeline, MatchResult};

pub const BATCH_STATUS_SUCCESS: &str = "success";

/// One resume in a bulk request.
#[derive(Debug, Clone)]
pub struct ResumeSubmission {
    pub identifier: String,
    pub source: DocumentSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub resume_identifier: String,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// Surviving results, best first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkBatchResult {
    pub status: &'static str,
    pub results: Vec<RankedResult>,
}

pub struct BulkEvaluator {
    pipeline: MatchPipeline,
    extractor: Arc<dyn TextExtractor>,
}

impl BulkEvaluator {
    pub fn new(pipeline: MatchPipeline, extractor: Arc<dyn TextExtractor>) -> Self {
        Self {
            pipeline,
            extractor,
        }
    }

    pub async fn evaluate_batch(
        &self,
        jd_text: &str,
        required_skills: &[String],
        resumes: Vec<ResumeSubmission>,
    ) -> BulkBatchResult {
        let submitted = resumes.len();
        let mut results = Vec::with_capacity(submitted);

        for ResumeSubmission { identifier, source } in resumes {
            match self.evaluate_one(jd_text, required_skills, source).await {
                Ok(result) => results.push(RankedResult {
                    resume_identifier: identifier,
                    result,
                }),
                Err(e) => warn!("Skipping resume '{identifier}': {e}"),
            }
        }

        rank(&mut results);

        info!(
            "Bulk evaluation scored {}/{} resumes",
            results.len(),
            submitted
        );

        BulkBatchResult {
            status: BATCH_STATUS_SUCCESS,
            results,
        }
    }

    async fn evaluate_one(
        &self,
        jd_text: &str,
        required_skills: &[String],
        source: DocumentSource,
    ) -> Result<MatchResult, AnalysisError> {
        let resume_text = extract_source(Arc::clone(&self.extractor), source).await?;
        Ok(self
            .pipeline
            .evaluate(jd_text, &resume_text, required_skills)
            .await?)
    }
}

/// Descending by final score; stable, so equal scores keep submission order.
fn rank(results: &mut [RankedResult]) {
    results.sort_by(|a, b| b.result.final_score.total_cmp(&a.result.final_score));
}
