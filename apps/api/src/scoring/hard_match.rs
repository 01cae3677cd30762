//! What fraction of the required skills a resume mentions.

use serde::Serialize;

use crate::scoring::fuzzy::partial_ratio;
use crate::scoring::SkillList;

/// Partial-ratio score a skill must exceed to count as a near-verbatim mention.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 85.0;

/// Coverage of the required skills by one resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HardMatch {
    /// 0 – 100; 100 when no skills were required.
    pub percent: f64,
    /// Matched skills in required-list order and casing.
    pub found: SkillList,
}

/// Scores skill coverage of `resume_text`.
///
/// A skill is found when its lower-cased form occurs in the lower-cased resume,
/// or when the fuzzy partial ratio between the two (on the whole-number 0–100
/// scale) exceeds `fuzzy_threshold`. Each required entry counts at most once.
pub fn score_hard_match(
    resume_text: &str,
    required_skills: &[String],
    fuzzy_threshold: f64,
) -> HardMatch {
    if required_skills.is_empty() {
        return HardMatch {
            percent: 100.0,
            found: Vec::new(),
        };
    }

    let resume_lower = resume_text.to_lowercase();

    let found: SkillList = required_skills
        .iter()
        .filter(|skill| {
            let skill_lower = skill.to_lowercase();
            resume_lower.contains(&skill_lower)
                || partial_ratio(&skill_lower, &resume_lower).round() > fuzzy_threshold
        })
        .cloned()
        .collect();

    let percent = found.len() as f64 / required_skills.len() as f64 * 100.0;

    HardMatch { percent, found }
}
