mod config;
mod db;
mod embedding;
mod errors;
mod evaluation;
mod extraction;
mod history;
mod llm_client;
mod models;
mod routes;
mod scoring;
mod skills;
mod state;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::embedding::HttpEmbedder;
use crate::extraction::DocumentTextExtractor;
use crate::llm_client::LlmClient;
use crate::routes::{build_router, cors_layer};
use crate::scoring::MatchPipeline;
use crate::skills::{LlmFeedbackGenerator, LlmSkillExtractor};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (creates the history table if needed)
    let db = create_pool(&config.database_url).await?;

    // Initialize embedding client
    let embedder = HttpEmbedder::new(
        &config.embedding_api_url,
        config.embedding_api_key.clone(),
        config.embedding_model.clone(),
    )?;
    info!("Embedding client initialized (model: {})", embedder.model());

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let pipeline = MatchPipeline::new(Arc::new(embedder), config.scoring_config());
    let scoring = pipeline.config();
    info!(
        "Scoring: fuzzy threshold {}, weights {}/{}",
        scoring.fuzzy_threshold, scoring.weights.hard_match, scoring.weights.semantic_match
    );

    // Build app state
    let state = AppState {
        db,
        pipeline,
        extractor: Arc::new(DocumentTextExtractor),
        skills: Arc::new(LlmSkillExtractor(llm.clone())),
        feedback: Arc::new(LlmFeedbackGenerator(llm)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
