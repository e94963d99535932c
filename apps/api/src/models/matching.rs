use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// A computed score for one (CV, job offer) pair. One row per pair,
/// overwritten on re-score.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MatchingRow {
    pub id: Uuid,
    pub cv_id: Uuid,
    pub job_offer_id: Uuid,
    /// Fraction of the offer's required skills found on the CV, in [0, 1].
    pub deterministic_score: f64,
    /// Normalized LLM judgment, in [0, 1].
    pub llm_score: f64,
    /// `w_det * deterministic_score + w_llm * llm_score`, in [0, 1].
    pub final_score: f64,
    /// Judge commentary: strengths, weaknesses, missing skills, summary,
    /// plus the weights and strategy used for this evaluation.
    pub details: serde_json::Value,
    pub evaluated_at: DateTime<Utc>,
}

/// A matching joined with the CV it scored, for per-offer listings.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MatchedCvRow {
    pub id: Uuid,
    pub cv_id: Uuid,
    pub cv_title: String,
    pub candidate_name: Option<String>,
    pub deterministic_score: f64,
    pub llm_score: f64,
    pub final_score: f64,
    pub details: serde_json::Value,
    pub evaluated_at: DateTime<Utc>,
}

/// A matching joined with the offer it scored, for per-CV listings.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MatchedOfferRow {
    pub id: Uuid,
    pub job_offer_id: Uuid,
    pub offer_title: String,
    pub company_name: String,
    pub deterministic_score: f64,
    pub llm_score: f64,
    pub final_score: f64,
    pub details: serde_json::Value,
    pub evaluated_at: DateTime<Utc>,
}

/// Inserts or overwrites the score for a (CV, offer) pair.
pub async fn upsert_matching(
    db: &PgPool,
    cv_id: Uuid,
    job_offer_id: Uuid,
    deterministic_score: f64,
    llm_score: f64,
    final_score: f64,
    details: &serde_json::Value,
) -> Result<MatchingRow, sqlx::Error> {
    sqlx::query_as::<_, MatchingRow>(
        r#"
        INSERT INTO matchings
            (id, cv_id, job_offer_id, deterministic_score, llm_score,
             final_score, details, evaluated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, now())
        ON CONFLICT (cv_id, job_offer_id) DO UPDATE SET
            deterministic_score = EXCLUDED.deterministic_score,
            llm_score = EXCLUDED.llm_score,
            final_score = EXCLUDED.final_score,
            details = EXCLUDED.details,
            evaluated_at = now()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(cv_id)
    .bind(job_offer_id)
    .bind(deterministic_score)
    .bind(llm_score)
    .bind(final_score)
    .bind(details)
    .fetch_one(db)
    .await
}

/// CVs scored against an offer, best first, optionally floored at `min_score`.
pub async fn list_matched_cvs(
    db: &PgPool,
    job_offer_id: Uuid,
    min_score: f64,
    limit: i64,
    offset: i64,
) -> Result<Vec<MatchedCvRow>, sqlx::Error> {
    sqlx::query_as::<_, MatchedCvRow>(
        r#"
        SELECT m.id, m.cv_id, c.title AS cv_title, c.name AS candidate_name,
               m.deterministic_score, m.llm_score, m.final_score,
               m.details, m.evaluated_at
        FROM matchings m
        JOIN cvs c ON c.id = m.cv_id
        WHERE m.job_offer_id = $1 AND m.final_score >= $2
        ORDER BY m.final_score DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(job_offer_id)
    .bind(min_score)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}

pub async fn count_matched_cvs(
    db: &PgPool,
    job_offer_id: Uuid,
    min_score: f64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM matchings WHERE job_offer_id = $1 AND final_score >= $2",
    )
    .bind(job_offer_id)
    .bind(min_score)
    .fetch_one(db)
    .await
}

/// Offers scored against a CV, best first, optionally floored at `min_score`.
pub async fn list_matched_offers(
    db: &PgPool,
    cv_id: Uuid,
    min_score: f64,
    limit: i64,
    offset: i64,
) -> Result<Vec<MatchedOfferRow>, sqlx::Error> {
    sqlx::query_as::<_, MatchedOfferRow>(
        r#"
        SELECT m.id, m.job_offer_id, o.title AS offer_title, o.company_name,
               m.deterministic_score, m.llm_score, m.final_score,
               m.details, m.evaluated_at
        FROM matchings m
        JOIN job_offers o ON o.id = m.job_offer_id
        WHERE m.cv_id = $1 AND m.final_score >= $2
        ORDER BY m.final_score DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(cv_id)
    .bind(min_score)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}

pub async fn count_matched_offers(
    db: &PgPool,
    cv_id: Uuid,
    min_score: f64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM matchings WHERE cv_id = $1 AND final_score >= $2")
        .bind(cv_id)
        .bind(min_score)
        .fetch_one(db)
        .await
}
