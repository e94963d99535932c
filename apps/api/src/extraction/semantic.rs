//! Structured extraction — turns raw CV text into candidate fields via the LLM.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::ExtractionError;
use crate::llm::prompts::{extraction_prompt, EXTRACT_SYSTEM};
use crate::llm::{call_json, ChatModel};
use crate::scoring::matcher::normalize_skills;

/// Candidate data extracted from a CV by the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub diploma: Option<String>,
    /// PhD=8, Master/Engineer=5, Bachelor=3, BTS/DUT=2, High School Diploma=1.
    #[serde(default)]
    pub diploma_ranking: i32,
    #[serde(default)]
    pub year_experience: i32,
    #[serde(default)]
    pub experiences: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
}

/// Runs the extraction prompt over raw CV text.
pub async fn extract_profile(
    model: &dyn ChatModel,
    raw_text: &str,
) -> Result<CandidateProfile, ExtractionError> {
    info!("Extracting structured CV data (model: {})", model.model_name());
    let profile: CandidateProfile =
        call_json(model, EXTRACT_SYSTEM, &extraction_prompt(raw_text)).await?;
    Ok(profile)
}

/// Writes an extracted profile (and the raw text it came from) onto a CV row.
/// Skills are normalized on the way in so scoring never re-normalizes rows.
pub async fn persist_profile(
    db: &PgPool,
    cv_id: Uuid,
    raw_text: &str,
    profile: &CandidateProfile,
) -> Result<(), sqlx::Error> {
    let skills = normalize_skills(&profile.skills);
    let experiences = serde_json::json!(profile.experiences);

    sqlx::query(
        r#"
        UPDATE cvs SET
            name = $1, website = $2, phone_number = $3, email = $4,
            description = $5, skills = $6, diploma = $7, diploma_ranking = $8,
            year_experience = $9, experiences = $10, languages = $11,
            certifications = $12, raw_text = $13, updated_at = now()
        WHERE id = $14
        "#,
    )
    .bind(&profile.name)
    .bind(&profile.website)
    .bind(&profile.phone_number)
    .bind(&profile.email)
    .bind(&profile.description)
    .bind(&skills)
    .bind(&profile.diploma)
    .bind(profile.diploma_ranking)
    .bind(profile.year_experience)
    .bind(&experiences)
    .bind(&profile.languages)
    .bind(&profile.certifications)
    .bind(raw_text)
    .bind(cv_id)
    .execute(db)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_with_missing_optional_fields() {
        let json = r#"{"name": "Jane Doe", "skills": ["Python", "SQL"]}"#;
        let profile: CandidateProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name.as_deref(), Some("Jane Doe"));
        assert_eq!(profile.skills, vec!["Python", "SQL"]);
        assert_eq!(profile.diploma_ranking, 0);
        assert!(profile.languages.is_empty());
    }

    #[test]
    fn test_profile_deserializes_full_payload() {
        let json = r#"{
            "name": "Jane Doe",
            "website": null,
            "phone_number": "+33 6 00 00 00 00",
            "email": "jane@example.com",
            "description": "Backend engineer",
            "skills": ["python", "sql"],
            "diploma": "Master",
            "diploma_ranking": 5,
            "year_experience": 7,
            "experiences": ["Backend engineer at Acme (2018-2024)"],
            "languages": ["French", "English"],
            "certifications": ["AWS SAA"]
        }"#;
        let profile: CandidateProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.diploma_ranking, 5);
        assert_eq!(profile.year_experience, 7);
        assert_eq!(profile.certifications.len(), 1);
    }
}
