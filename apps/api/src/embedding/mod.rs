//! Turns text into a fixed-length vector.
//!
//! The scoring engine only sees the `Embedder` trait. One `Arc<dyn Embedder>` is
//! built at startup and shared read-only by every request through `MatchPipeline`.
//! `HttpEmbedder` talks to any OpenAI-compatible `/embeddings` endpoint
//! (a sentence-transformers server, a hosted provider, ...).

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

pub const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Embedding service returned no vectors")]
    Empty,

    #[error("Embedding dimensions differ ({left} vs {right})")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Embedding contains non-finite values")]
    NonFinite,
}

/// Anything that can embed text. Must be deterministic for identical input.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl EmbeddingResponse {
    fn into_first_vector(self) -> Result<Vec<f32>, EmbeddingError> {
        self.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .filter(|v| !v.is_empty())
            .ok_or(EmbeddingError::Empty)
    }
}

/// Embedder backed by a remote OpenAI-compatible embeddings API.
#[derive(Clone)]
pub struct HttpEmbedder {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl HttpEmbedder {
    pub fn new(base_url: &str, api_key: Option<String>, model: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build embedding HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", base_url.trim_end_matches('/')),
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: [text],
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Embedding API error {}: {}", status, message);
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let vector = response.json::<EmbeddingResponse>().await?.into_first_vector()?;
        debug!("Embedded {} chars into {} dimensions", text.len(), vector.len());
        Ok(vector)
    }
}
