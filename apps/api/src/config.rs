use anyhow::{bail, Context, Result};

use crate::scoring::composer::ScoreWeights;

/// LLM provider selected via `EXTRACTION_MODEL_PROVIDER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelProvider {
    OpenAi,
    Anthropic,
    Ollama,
}

impl ModelProvider {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "openai" => Ok(ModelProvider::OpenAi),
            "anthropic" => Ok(ModelProvider::Anthropic),
            "ollama" => Ok(ModelProvider::Ollama),
            other => bail!(
                "Unsupported EXTRACTION_MODEL_PROVIDER '{other}' (expected openai, anthropic or ollama)"
            ),
        }
    }
}

/// Skill matching strategy selected via `SKILL_MATCH_STRATEGY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    Exact,
    Fuzzy,
}

impl MatchStrategy {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "exact" => Ok(MatchStrategy::Exact),
            "fuzzy" => Ok(MatchStrategy::Fuzzy),
            other => bail!("Unsupported SKILL_MATCH_STRATEGY '{other}' (expected exact or fuzzy)"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub provider: ModelProvider,
    pub model: String,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub ollama_base_url: String,
    pub upload_dir: String,
    pub weights: ScoreWeights,
    pub match_strategy: MatchStrategy,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let provider = ModelProvider::parse(&require_env("EXTRACTION_MODEL_PROVIDER")?)?;
        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        let anthropic_api_key = std::env::var("ANTHROPIC_API_KEY").ok();

        // The credential for the selected provider must be present up front,
        // not discovered on the first scoring request.
        match provider {
            ModelProvider::OpenAi if openai_api_key.is_none() => {
                bail!("OPENAI_API_KEY is required when EXTRACTION_MODEL_PROVIDER=openai")
            }
            ModelProvider::Anthropic if anthropic_api_key.is_none() => {
                bail!("ANTHROPIC_API_KEY is required when EXTRACTION_MODEL_PROVIDER=anthropic")
            }
            _ => {}
        }

        let weights = ScoreWeights::new(
            parse_weight("DETERMINISTIC_WEIGHT", 0.5)?,
            parse_weight("LLM_WEIGHT", 0.5)?,
        )?;

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            provider,
            model: require_env("EXTRACTION_MODEL")?,
            openai_api_key,
            anthropic_api_key,
            ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./media/cv".to_string()),
            weights,
            match_strategy: MatchStrategy::parse(
                &std::env::var("SKILL_MATCH_STRATEGY").unwrap_or_else(|_| "exact".to_string()),
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_weight(key: &str, default: f64) -> Result<f64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("{key} must be a number")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse_accepts_known_names() {
        assert_eq!(
            ModelProvider::parse("openai").unwrap(),
            ModelProvider::OpenAi
        );
        assert_eq!(
            ModelProvider::parse("Anthropic").unwrap(),
            ModelProvider::Anthropic
        );
        assert_eq!(
            ModelProvider::parse("OLLAMA").unwrap(),
            ModelProvider::Ollama
        );
    }

    #[test]
    fn test_provider_parse_rejects_unknown_name() {
        assert!(ModelProvider::parse("cohere").is_err());
    }

    #[test]
    fn test_match_strategy_parse() {
        assert_eq!(MatchStrategy::parse("exact").unwrap(), MatchStrategy::Exact);
        assert_eq!(MatchStrategy::parse("Fuzzy").unwrap(), MatchStrategy::Fuzzy);
        assert!(MatchStrategy::parse("semantic").is_err());
    }
}
