use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm::ChatModel;
use crate::scoring::matcher::SkillMatch;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// The configured LLM backend, shared by skill extraction and the judge.
    pub llm: Arc<dyn ChatModel>,
    /// Pluggable skill matching strategy. Default: exact. Swap via SKILL_MATCH_STRATEGY.
    pub matcher: Arc<dyn SkillMatch>,
    pub config: Config,
}
