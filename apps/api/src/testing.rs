//! Deterministic stand-ins for the external collaborators, shared by unit tests.

use std::path::Path;

use async_trait::async_trait;

use crate::embedding::{Embedder, EmbeddingError};
use crate::extraction::{DocumentKind, ExtractionError, TextExtractor};
use crate::llm_client::LlmError;
use crate::scoring::SkillList;
use crate::skills::{FeedbackGenerator, SkillExtractor};

pub fn skills(list: &[&str]) -> SkillList {
    list.iter().map(|s| s.to_string()).collect()
}

/// 26-dimensional ASCII letter histogram. Identical text → identical vector.
pub struct LetterEmbedder;

#[async_trait]
impl Embedder for LetterEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut counts = vec![0.0_f32; 26];
        for c in text.chars().filter(char::is_ascii_alphabetic) {
            counts[(c.to_ascii_lowercase() as u8 - b'a') as usize] += 1.0;
        }
        Ok(counts)
    }
}

/// `anchor` embeds to the x unit vector; every other text sits at `cosine` to it.
pub struct FixedEmbedder {
    anchor: String,
    other: Vec<f32>,
}

impl FixedEmbedder {
    pub fn at_cosine(anchor: &str, cosine: f32) -> Self {
        Self {
            anchor: anchor.to_string(),
            other: vec![cosine, (1.0 - cosine * cosine).sqrt()],
        }
    }
}

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text == self.anchor {
            Ok(vec![1.0, 0.0])
        } else {
            Ok(self.other.clone())
        }
    }
}

pub struct ZeroEmbedder;

#[async_trait]
impl Embedder for ZeroEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(vec![0.0; 4])
    }
}

/// Vector length follows the text length, so different texts disagree on dimension.
pub struct RaggedEmbedder;

#[async_trait]
impl Embedder for RaggedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(vec![1.0; text.len()])
    }
}

/// Yields an infinite component for texts starting with "inf", NaN for "nan",
/// and the x unit vector otherwise.
pub struct NonFiniteEmbedder;

#[async_trait]
impl Embedder for NonFiniteEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let x = if text.starts_with("inf") {
            f32::INFINITY
        } else if text.starts_with("nan") {
            f32::NAN
        } else {
            1.0
        };
        Ok(vec![x, 0.0])
    }
}

pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::Api {
            status: 503,
            message: "model unavailable".to_string(),
        })
    }
}

/// Reads any supported document as UTF-8, so tests can upload plain bytes
/// under a `.pdf` or `.docx` name.
pub struct Utf8TextExtractor;

impl TextExtractor for Utf8TextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        DocumentKind::from_path(path)?;
        Ok(std::fs::read_to_string(path)?)
    }
}

pub struct StaticSkillExtractor(pub SkillList);

#[async_trait]
impl SkillExtractor for StaticSkillExtractor {
    async fn extract_skills(&self, _jd_text: &str) -> Result<SkillList, LlmError> {
        Ok(self.0.clone())
    }
}

pub struct FailingSkillExtractor;

#[async_trait]
impl SkillExtractor for FailingSkillExtractor {
    async fn extract_skills(&self, _jd_text: &str) -> Result<SkillList, LlmError> {
        Err(LlmError::EmptyContent)
    }
}

/// Echoes the missing skills back so tests can see what the generator received.
pub struct EchoFeedbackGenerator;

#[async_trait]
impl FeedbackGenerator for EchoFeedbackGenerator {
    async fn generate_feedback(
        &self,
        _jd_text: &str,
        found_skills: &[String],
        missing_skills: &[String],
    ) -> Result<String, LlmError> {
        Ok(format!(
            "found: {}; missing: {}",
            found_skills.join(", "),
            missing_skills.join(", ")
        ))
    }
}

pub struct FailingFeedbackGenerator;

#[async_trait]
impl FeedbackGenerator for FailingFeedbackGenerator {
    async fn generate_feedback(
        &self,
        _jd_text: &str,
        _found_skills: &[String],
        _missing_skills: &[String],
    ) -> Result<String, LlmError> {
        Err(LlmError::RateLimited { retries: 3 })
    }
}
