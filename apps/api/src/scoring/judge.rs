//! LLM judge — sends raw CV text and offer text to the configured model and
//! parses a fit judgment.
//!
//! Single attempt, no fallback: any provider, network or parse failure
//! surfaces as [`LlmError`] and the caller aborts the scoring request.
//! Inputs are not chunked; a CV larger than the provider's context window
//! fails with the provider's own error.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::llm::prompts::{judge_prompt, JUDGE_SYSTEM};
use crate::llm::{call_json, ChatModel, LlmError};

/// Raw judge output as the model returns it. `score` is on a 0-100 scale —
/// models produce markedly better-calibrated numbers on that scale than
/// on 0-1.
#[derive(Debug, Deserialize)]
struct RawJudgment {
    score: f64,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    missing_skills: Vec<String>,
    #[serde(default)]
    summary: String,
}

/// Parsed judgment with the score normalized into [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Judgment {
    pub score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub missing_skills: Vec<String>,
    pub summary: String,
}

impl From<RawJudgment> for Judgment {
    fn from(raw: RawJudgment) -> Self {
        Judgment {
            score: (raw.score / 100.0).clamp(0.0, 1.0),
            strengths: raw.strengths,
            weaknesses: raw.weaknesses,
            missing_skills: raw.missing_skills,
            summary: raw.summary,
        }
    }
}

/// Judges a CV against an offer. One model call, errors propagate.
pub async fn judge(
    model: &dyn ChatModel,
    cv_text: &str,
    offer_text: &str,
) -> Result<Judgment, LlmError> {
    info!("Requesting LLM judgment (model: {})", model.model_name());

    let raw: RawJudgment =
        call_json(model, JUDGE_SYSTEM, &judge_prompt(cv_text, offer_text)).await?;
    let judgment = Judgment::from(raw);

    info!("LLM judgment received: score={:.3}", judgment.score);
    Ok(judgment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Canned-response model for exercising the parse path without a network.
    struct CannedModel(String);

    #[async_trait]
    impl ChatModel for CannedModel {
        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.clone())
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    /// Model that always fails, as a timed-out or unreachable provider would.
    struct FailingModel;

    #[async_trait]
    impl ChatModel for FailingModel {
        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 529,
                message: "overloaded".to_string(),
            })
        }

        fn model_name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_judge_normalizes_score_to_unit_interval() {
        let model = CannedModel(
            r#"{"score": 72, "strengths": ["Python"], "weaknesses": [], "missing_skills": ["java"], "summary": "Decent fit."}"#
                .to_string(),
        );
        let judgment = judge(&model, "cv text", "offer text").await.unwrap();
        assert!((judgment.score - 0.72).abs() < 1e-9);
        assert_eq!(judgment.missing_skills, vec!["java"]);
    }

    #[tokio::test]
    async fn test_judge_clamps_out_of_range_scores() {
        let model = CannedModel(r#"{"score": 140, "summary": "?"}"#.to_string());
        let judgment = judge(&model, "cv", "offer").await.unwrap();
        assert_eq!(judgment.score, 1.0);

        let model = CannedModel(r#"{"score": -10, "summary": "?"}"#.to_string());
        let judgment = judge(&model, "cv", "offer").await.unwrap();
        assert_eq!(judgment.score, 0.0);
    }

    #[tokio::test]
    async fn test_judge_strips_markdown_fences() {
        let model = CannedModel("```json\n{\"score\": 50, \"summary\": \"ok\"}\n```".to_string());
        let judgment = judge(&model, "cv", "offer").await.unwrap();
        assert!((judgment.score - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_a_parse_error() {
        let model = CannedModel("the candidate looks great!".to_string());
        let err = judge(&model, "cv", "offer").await.unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let err = judge(&FailingModel, "cv", "offer").await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 529, .. }));
    }
}
