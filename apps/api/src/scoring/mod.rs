// Scoring engine: hard-skill coverage, semantic fit, and the blended verdict.
// Pure functions except `semantic`, which calls the injected embedder.

pub mod combiner;
pub mod fuzzy;
pub mod hard_match;
pub mod pipeline;
pub mod semantic;

pub use combiner::{ScoreWeights, Verdict};
pub use pipeline::{MatchPipeline, MatchResult, ScoringConfig};

/// Ordered skill names as produced by skill extraction. Casing is preserved
/// and duplicates are kept.
pub type SkillList = Vec<String>;
