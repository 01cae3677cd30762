//! Match pipeline — hard match → semantic match → combiner for one (JD, resume) pair.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embedding::{Embedder, EmbeddingError};
use crate::scoring::combiner::{combine_scores, ScoreWeights, Verdict};
use crate::scoring::hard_match::{score_hard_match, DEFAULT_FUZZY_THRESHOLD};
use crate::scoring::semantic::score_semantic_match;
use crate::scoring::SkillList;

/// Tunable constants of the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub fuzzy_threshold: f64,
    pub weights: ScoreWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            weights: ScoreWeights::default(),
        }
    }
}

/// Verdict for one resume against one job description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub hard_match_percent: f64,
    pub semantic_fit_percent: f64,
    pub found_skills: SkillList,
    /// Rounded to 2 decimal places.
    pub final_score: f64,
    pub verdict: Verdict,
}

/// Scores resumes against job descriptions with a shared embedder.
#[derive(Clone)]
pub struct MatchPipeline {
    embedder: Arc<dyn Embedder>,
    config: ScoringConfig,
}

impl MatchPipeline {
    pub fn new(embedder: Arc<dyn Embedder>, config: ScoringConfig) -> Self {
        Self { embedder, config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Runs the full pipeline. Only embedding failures can make this fail.
    pub async fn evaluate(
        &self,
        jd_text: &str,
        resume_text: &str,
        required_skills: &[String],
    ) -> Result<MatchResult, EmbeddingError> {
        let hard = score_hard_match(resume_text, required_skills, self.config.fuzzy_threshold);
        let semantic_fit_percent =
            score_semantic_match(self.embedder.as_ref(), resume_text, jd_text).await?;
        let final_score =
            combine_scores(hard.percent, semantic_fit_percent, &self.config.weights);
        let verdict = Verdict::classify(final_score);

        debug!(
            "hard={:.2} semantic={:.2} final={final_score} verdict={verdict}",
            hard.percent, semantic_fit_percent
        );

        Ok(MatchResult {
            hard_match_percent: hard.percent,
            semantic_fit_percent,
            found_skills: hard.found,
            final_score,
            verdict,
        })
    }
}
