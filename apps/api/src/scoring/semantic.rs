//! Semantic fit: embedding cosine similarity rescaled to 0–100.
//!
//! Degenerate input is defined rather than left to a division by zero:
//! blank text and zero-magnitude vectors both score 0.

use crate::embedding::{Embedder, EmbeddingError};

/// Cosine similarity in [-1, 1], or `None` when either vector has zero magnitude.
/// Both slices must have the same length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f64> {
    let (mut dot, mut norm_a, mut norm_b) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }

    Some((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0))
}

/// Maps a cosine similarity in [-1, 1] onto [0, 100].
pub fn similarity_to_percent(cosine: f64) -> f64 {
    (cosine + 1.0) / 2.0 * 100.0
}

/// Embeds both texts and returns their similarity as a percentage.
pub async fn score_semantic_match(
    embedder: &dyn Embedder,
    resume_text: &str,
    jd_text: &str,
) -> Result<f64, EmbeddingError> {
    if resume_text.trim().is_empty() || jd_text.trim().is_empty() {
        return Ok(0.0);
    }

    let (resume_vec, jd_vec) =
        tokio::try_join!(embedder.embed(resume_text), embedder.embed(jd_text))?;

    if resume_vec.len() != jd_vec.len() {
        return Err(EmbeddingError::DimensionMismatch {
            left: resume_vec.len(),
            right: jd_vec.len(),
        });
    }

    if resume_vec.iter().chain(&jd_vec).any(|x| !x.is_finite()) {
        return Err(EmbeddingError::NonFinite);
    }

    Ok(cosine_similarity(&resume_vec, &jd_vec)
        .map(similarity_to_percent)
        .unwrap_or(0.0))
}
