use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractType {
    LongTerm,
    ShortTerm,
    Freelance,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::LongTerm => "LONG_TERM",
            ContractType::ShortTerm => "SHORT_TERM",
            ContractType::Freelance => "FREELANCE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkType {
    OnSite,
    Hybrid,
    Remote,
}

impl WorkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::OnSite => "ON_SITE",
            WorkType::Hybrid => "HYBRID",
            WorkType::Remote => "REMOTE",
        }
    }
}

/// A stored job offer. `required_skills` carry no per-skill weights:
/// every skill counts the same in the deterministic score.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct JobOfferRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub company_name: String,
    pub location: String,
    pub start_date: Option<NaiveDate>,
    pub required_languages: Vec<String>,
    pub required_diploma: Option<String>,
    /// PhD=8, Master/Engineer=5, Bachelor=3, BTS/DUT=2, High School Diploma=1.
    pub required_diploma_ranking: Option<i32>,
    pub required_experience: i32,
    pub contract_type: String,
    pub work_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_expired: bool,
}

impl JobOfferRow {
    /// Renders the offer as the plain-text block the judge prompt embeds.
    pub fn judge_context(&self) -> String {
        format!(
            "Title: {}\nCompany: {}\nLocation: {}\nContract: {} / {}\n\
             Required skills: {}\nRequired languages: {}\nRequired diploma: {}\n\
             Required experience: {} years\nDescription:\n{}",
            self.title,
            self.company_name,
            self.location,
            self.contract_type,
            self.work_type,
            self.required_skills.join(", "),
            self.required_languages.join(", "),
            self.required_diploma.as_deref().unwrap_or("unspecified"),
            self.required_experience,
            self.description,
        )
    }
}

/// Creation/update payload shared by POST and PATCH handlers.
#[derive(Debug, Deserialize)]
pub struct JobOfferInput {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub company_name: String,
    pub location: String,
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub required_languages: Vec<String>,
    pub required_diploma: Option<String>,
    pub required_diploma_ranking: Option<i32>,
    pub required_experience: i32,
    pub contract_type: ContractType,
    pub work_type: WorkType,
    pub expires_at: Option<DateTime<Utc>>,
}

pub async fn insert_offer(db: &PgPool, input: &JobOfferInput) -> Result<JobOfferRow, sqlx::Error> {
    sqlx::query_as::<_, JobOfferRow>(
        r#"
        INSERT INTO job_offers
            (id, title, description, required_skills, company_name, location,
             start_date, required_languages, required_diploma,
             required_diploma_ranking, required_experience, contract_type,
             work_type, expires_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.required_skills)
    .bind(&input.company_name)
    .bind(&input.location)
    .bind(input.start_date)
    .bind(&input.required_languages)
    .bind(&input.required_diploma)
    .bind(input.required_diploma_ranking)
    .bind(input.required_experience)
    .bind(input.contract_type.as_str())
    .bind(input.work_type.as_str())
    .bind(input.expires_at)
    .fetch_one(db)
    .await
}

pub async fn find_offer(db: &PgPool, id: Uuid) -> Result<Option<JobOfferRow>, sqlx::Error> {
    sqlx::query_as::<_, JobOfferRow>("SELECT * FROM job_offers WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn list_offers(
    db: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<JobOfferRow>, sqlx::Error> {
    sqlx::query_as::<_, JobOfferRow>(
        "SELECT * FROM job_offers ORDER BY created_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}

pub async fn count_offers(db: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM job_offers")
        .fetch_one(db)
        .await
}

pub async fn update_offer(
    db: &PgPool,
    id: Uuid,
    input: &JobOfferInput,
) -> Result<Option<JobOfferRow>, sqlx::Error> {
    sqlx::query_as::<_, JobOfferRow>(
        r#"
        UPDATE job_offers SET
            title = $1, description = $2, required_skills = $3, company_name = $4,
            location = $5, start_date = $6, required_languages = $7,
            required_diploma = $8, required_diploma_ranking = $9,
            required_experience = $10, contract_type = $11, work_type = $12,
            expires_at = $13, updated_at = now()
        WHERE id = $14
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.required_skills)
    .bind(&input.company_name)
    .bind(&input.location)
    .bind(input.start_date)
    .bind(&input.required_languages)
    .bind(&input.required_diploma)
    .bind(input.required_diploma_ranking)
    .bind(input.required_experience)
    .bind(input.contract_type.as_str())
    .bind(input.work_type.as_str())
    .bind(input.expires_at)
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_offer(db: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM job_offers WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_type_serde_screaming_snake() {
        let parsed: ContractType = serde_json::from_str(r#""LONG_TERM""#).unwrap();
        assert_eq!(parsed, ContractType::LongTerm);
        assert_eq!(
            serde_json::to_string(&ContractType::Freelance).unwrap(),
            r#""FREELANCE""#
        );
    }

    #[test]
    fn test_work_type_as_str_round_trip() {
        for (value, expected) in [
            (WorkType::OnSite, "ON_SITE"),
            (WorkType::Hybrid, "HYBRID"),
            (WorkType::Remote, "REMOTE"),
        ] {
            assert_eq!(value.as_str(), expected);
            let parsed: WorkType = serde_json::from_str(&format!("\"{expected}\"")).unwrap();
            assert_eq!(parsed, value);
        }
    }

    #[test]
    fn test_judge_context_includes_requirements() {
        let offer = JobOfferRow {
            id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            description: "Build payment APIs".to_string(),
            required_skills: vec!["python".to_string(), "sql".to_string()],
            company_name: "Acme".to_string(),
            location: "Paris".to_string(),
            start_date: None,
            required_languages: vec!["English".to_string()],
            required_diploma: Some("Master".to_string()),
            required_diploma_ranking: Some(5),
            required_experience: 4,
            contract_type: "LONG_TERM".to_string(),
            work_type: "HYBRID".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            expires_at: None,
            is_expired: false,
        };
        let context = offer.judge_context();
        assert!(context.contains("python, sql"));
        assert!(context.contains("4 years"));
        assert!(context.contains("Build payment APIs"));
    }
}
