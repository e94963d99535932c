use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// A stored CV. Upload fields are set at creation; the extracted fields
/// are populated by the LLM extractor and stay NULL/empty until it runs.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CvRow {
    pub id: Uuid,
    pub title: String,
    pub file_path: String,
    pub name: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    /// Normalized skill tokens (trimmed, lowercased, deduped at write time).
    pub skills: Vec<String>,
    pub diploma: Option<String>,
    pub diploma_ranking: Option<i32>,
    pub certifications: Vec<String>,
    pub year_experience: Option<i32>,
    /// Summarized experiences as a JSON array of strings.
    pub experiences: serde_json::Value,
    pub languages: Vec<String>,
    pub raw_text: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub async fn insert_cv(
    db: &PgPool,
    title: &str,
    file_path: &str,
) -> Result<CvRow, sqlx::Error> {
    sqlx::query_as::<_, CvRow>(
        r#"
        INSERT INTO cvs (id, title, file_path)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(file_path)
    .fetch_one(db)
    .await
}

pub async fn find_cv(db: &PgPool, id: Uuid) -> Result<Option<CvRow>, sqlx::Error> {
    sqlx::query_as::<_, CvRow>("SELECT * FROM cvs WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn list_cvs(db: &PgPool, limit: i64, offset: i64) -> Result<Vec<CvRow>, sqlx::Error> {
    sqlx::query_as::<_, CvRow>(
        "SELECT * FROM cvs ORDER BY uploaded_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}

pub async fn count_cvs(db: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM cvs")
        .fetch_one(db)
        .await
}

pub async fn update_cv_title(
    db: &PgPool,
    id: Uuid,
    title: &str,
) -> Result<Option<CvRow>, sqlx::Error> {
    sqlx::query_as::<_, CvRow>(
        "UPDATE cvs SET title = $1, updated_at = now() WHERE id = $2 RETURNING *",
    )
    .bind(title)
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Returns whether a row was deleted.
pub async fn delete_cv(db: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM cvs WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
