//! Scoring pipeline: deterministic matcher + LLM judge -> composed final score.
//!
//! A score request runs end-to-end within the HTTP request: load the pair,
//! make sure the CV has extracted skills, compute the deterministic score,
//! ask the judge, compose, persist. Nothing is shared across requests and
//! nothing coordinates concurrent scoring of the same pair — two racing
//! requests will both call the LLM and the last upsert wins.

pub mod composer;
pub mod judge;
pub mod matcher;

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::semantic::{extract_profile, persist_profile};
use crate::extraction::ExtractionError;
use crate::models::cv::{find_cv, CvRow};
use crate::models::matching::{upsert_matching, MatchingRow};
use crate::models::offer::find_offer;
use crate::scoring::matcher::normalize_skills;
use crate::state::AppState;

/// Scores one CV against one job offer and upserts the result.
///
/// Failure ordering is part of the contract: an offer without required
/// skills fails before any LLM call, and a judge failure aborts the
/// request before the composer runs — no partial rows are written.
pub async fn score_cv_against_offer(
    state: &AppState,
    cv_id: Uuid,
    offer_id: Uuid,
) -> Result<MatchingRow, AppError> {
    let cv = find_cv(&state.db, cv_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {cv_id} not found")))?;
    let offer = find_offer(&state.db, offer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job offer {offer_id} not found")))?;

    let cv = ensure_extracted(state, cv).await?;
    let raw_text = cv.raw_text.as_deref().ok_or(ExtractionError::NoText)?;

    let deterministic =
        matcher::deterministic_score(state.matcher.as_ref(), &cv.skills, &offer.required_skills)?;
    info!(
        "Deterministic score for CV {} vs offer {}: {:.3}",
        cv.id, offer.id, deterministic
    );

    let judgment = judge::judge(state.llm.as_ref(), raw_text, &offer.judge_context()).await?;

    let final_score = composer::compose(state.config.weights, deterministic, judgment.score);
    info!(
        "Final score for CV {} vs offer {}: {:.3} (det={:.3}, llm={:.3})",
        cv.id, offer.id, final_score, deterministic, judgment.score
    );

    let details = serde_json::json!({
        "strengths": judgment.strengths,
        "weaknesses": judgment.weaknesses,
        "missing_skills": judgment.missing_skills,
        "summary": judgment.summary,
        "weights": state.config.weights,
        "matcher": state.matcher.name(),
        "model": state.llm.model_name(),
    });

    let matching = upsert_matching(
        &state.db,
        cv.id,
        offer.id,
        deterministic,
        judgment.score,
        final_score,
        &details,
    )
    .await?;

    Ok(matching)
}

/// Makes sure the CV carries extracted skills, running the LLM extractor
/// on demand when the upload-time extraction was skipped or wiped.
async fn ensure_extracted(state: &AppState, cv: CvRow) -> Result<CvRow, AppError> {
    if !cv.skills.is_empty() {
        return Ok(cv);
    }

    let raw_text = cv
        .raw_text
        .clone()
        .ok_or(ExtractionError::NoText)?;

    info!("CV {} has no extracted skills; extracting on demand", cv.id);
    let profile = extract_profile(state.llm.as_ref(), &raw_text).await?;
    persist_profile(&state.db, cv.id, &raw_text, &profile).await?;

    // Avoid a reload round-trip: patch the fields the extractor wrote.
    let mut cv = cv;
    cv.skills = normalize_skills(&profile.skills);
    Ok(cv)
}
