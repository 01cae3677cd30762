//! Skill extraction and candidate feedback, the two LLM-backed collaborators.
//!
//! Neither is allowed to fail a request. A failed skill extraction degrades to an
//! empty required-skill list (which the hard-match scorer treats as a full match);
//! a failed feedback call degrades to `FEEDBACK_FALLBACK`.

pub mod prompts;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::llm_client::prompts::{CAREER_COACH_PERSONA, JSON_ONLY_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};
use crate::scoring::SkillList;
use crate::skills::prompts::{FEEDBACK_PROMPT, SKILL_EXTRACTION_PROMPT};

pub const FEEDBACK_FALLBACK: &str = "Could not generate feedback at this time.";

const EXTRACTION_TEMPERATURE: f32 = 0.0;
const FEEDBACK_TEMPERATURE: f32 = 0.5;

// ────────────────────────────────────────────────────────────────────────────
// Traits
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait SkillExtractor: Send + Sync {
    async fn extract_skills(&self, jd_text: &str) -> Result<SkillList, LlmError>;
}

#[async_trait]
pub trait FeedbackGenerator: Send + Sync {
    async fn generate_feedback(
        &self,
        jd_text: &str,
        found_skills: &[String],
        missing_skills: &[String],
    ) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LLM-backed implementations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ExtractedSkills {
    #[serde(default)]
    skills: SkillList,
}

pub struct LlmSkillExtractor(pub LlmClient);

#[async_trait]
impl SkillExtractor for LlmSkillExtractor {
    async fn extract_skills(&self, jd_text: &str) -> Result<SkillList, LlmError> {
        let prompt = SKILL_EXTRACTION_PROMPT.replace("{jd_text}", jd_text);
        let extracted: ExtractedSkills = self
            .0
            .call_json(&prompt, JSON_ONLY_SYSTEM, Some(EXTRACTION_TEMPERATURE))
            .await?;
        Ok(extracted.skills)
    }
}

pub struct LlmFeedbackGenerator(pub LlmClient);

#[async_trait]
impl FeedbackGenerator for LlmFeedbackGenerator {
    async fn generate_feedback(
        &self,
        jd_text: &str,
        found_skills: &[String],
        missing_skills: &[String],
    ) -> Result<String, LlmError> {
        let prompt = build_feedback_prompt(jd_text, found_skills, missing_skills);
        self.0
            .call_text(&prompt, CAREER_COACH_PERSONA, Some(FEEDBACK_TEMPERATURE))
            .await
    }
}

fn build_feedback_prompt(jd_text: &str, found_skills: &[String], missing_skills: &[String]) -> String {
    let missing = if missing_skills.is_empty() {
        "None".to_string()
    } else {
        missing_skills.join(", ")
    };
    FEEDBACK_PROMPT
        .replace("{missing_skills}", &missing)
        .replace("{found_skills}", &found_skills.join(", "))
        .replace("{jd_text}", jd_text)
}

// ────────────────────────────────────────────────────────────────────────────
// Failure-absorbing entry points
// ────────────────────────────────────────────────────────────────────────────

/// Required skills for a JD, or an empty list if extraction fails.
pub async fn extract_required_skills(extractor: &dyn SkillExtractor, jd_text: &str) -> SkillList {
    match extractor.extract_skills(jd_text).await {
        Ok(skills) => {
            info!("Extracted {} required skills from job description", skills.len());
            skills
        }
        Err(e) => {
            warn!("Skill extraction failed, continuing without required skills: {e}");
            Vec::new()
        }
    }
}

/// Coaching feedback for a candidate, or `FEEDBACK_FALLBACK` if generation fails.
pub async fn feedback_or_fallback(
    generator: &dyn FeedbackGenerator,
    jd_text: &str,
    required_skills: &[String],
    found_skills: &[String],
) -> String {
    let missing = missing_skills(required_skills, found_skills);
    match generator
        .generate_feedback(jd_text, found_skills, &missing)
        .await
    {
        Ok(feedback) => feedback,
        Err(e) => {
            warn!("Feedback generation failed: {e}");
            FEEDBACK_FALLBACK.to_string()
        }
    }
}

/// Required skills not in `found`, in required-list order, without repeats.
pub fn missing_skills(required: &[String], found: &[String]) -> SkillList {
    let mut missing: SkillList = Vec::new();
    for skill in required {
        if !found.contains(skill) && !missing.contains(skill) {
            missing.push(skill.clone());
        }
    }
    missing
}
