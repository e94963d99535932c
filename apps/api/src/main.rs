mod config;
mod db;
mod errors;
mod extraction;
mod handlers;
mod llm;
mod models;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, MatchStrategy};
use crate::db::create_pool;
use crate::llm::build_chat_model;
use crate::routes::build_router;
use crate::scoring::matcher::{ExactMatch, FuzzyMatch, SkillMatch};
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

    info!("Starting CV Match API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Upload directory for CV files
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    info!("Upload directory ready: {}", config.upload_dir);

    // LLM backend, selected once from configuration
    let llm = build_chat_model(&config)?;
    info!(
        "LLM backend initialized (provider: {:?}, model: {})",
        config.provider,
        llm.model_name()
    );

    // Skill matching strategy (default: exact — swap via SKILL_MATCH_STRATEGY)
    let matcher: Arc<dyn SkillMatch> = match config.match_strategy {
        MatchStrategy::Exact => Arc::new(ExactMatch),
        MatchStrategy::Fuzzy => Arc::new(FuzzyMatch),
    };
    info!(
        "Skill matcher: {} | score weights: deterministic={}, llm={}",
        matcher.name(),
        config.weights.deterministic,
        config.weights.llm
    );

    // Build app state
    let state = AppState {
        db,
        llm,
        matcher,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // admin pages are served from anywhere

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
