use std::sync::Arc;

use sqlx::PgPool;

use crate::extraction::TextExtractor;
use crate::scoring::MatchPipeline;
use crate::skills::{FeedbackGenerator, SkillExtractor};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Hard match, semantic match and score combination over the shared embedder.
    pub pipeline: MatchPipeline,
    /// PDF/DOCX text extraction. Runs on the blocking pool.
    pub extractor: Arc<dyn TextExtractor>,
    pub skills: Arc<dyn SkillExtractor>,
    pub feedback: Arc<dyn FeedbackGenerator>,
}
