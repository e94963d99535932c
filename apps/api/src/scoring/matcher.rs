//! Deterministic skill matcher.
//!
//! Computes the fraction of an offer's required skills found in a CV's
//! extracted skills. Pure, idempotent, no I/O. Matching is exact string
//! equality after trimming and lowercasing — "react" will not match
//! "react.js" under the default strategy; that is a documented limitation
//! of keyword matching, not a defect. The LLM judge is the place where
//! synonyms get picked up.

use std::collections::BTreeSet;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("Job offer has no required skills; nothing to score against")]
    EmptyOfferSkills,
}

/// Skill comparison strategy. Both sides arrive already normalized
/// (trimmed, lowercased).
pub trait SkillMatch: Send + Sync {
    fn is_match(&self, cv_skill: &str, offer_skill: &str) -> bool;

    /// Strategy label, persisted alongside results for transparency.
    fn name(&self) -> &'static str;
}

/// Exact string equality. The default.
pub struct ExactMatch;

impl SkillMatch for ExactMatch {
    fn is_match(&self, cv_skill: &str, offer_skill: &str) -> bool {
        cv_skill == offer_skill
    }

    fn name(&self) -> &'static str {
        "exact"
    }
}

/// Containment either way: "react" matches "react.js" and vice versa.
pub struct FuzzyMatch;

impl SkillMatch for FuzzyMatch {
    fn is_match(&self, cv_skill: &str, offer_skill: &str) -> bool {
        cv_skill.contains(offer_skill) || offer_skill.contains(cv_skill)
    }

    fn name(&self) -> &'static str {
        "fuzzy"
    }
}

/// Normalizes a skill token: trim + lowercase. Empty tokens are dropped
/// by [`normalize_skills`].
pub fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Normalizes and dedupes a skill list. BTreeSet keeps the output stable
/// regardless of input order.
pub fn normalize_skills(skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .map(|s| normalize_skill(s))
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Computes `|offer skills covered by the CV| / |offer skills|`, in [0, 1].
///
/// All offer skills weigh the same; there is no per-skill weighting.
/// An offer with no required skills is an error, not a free 100%.
pub fn deterministic_score(
    strategy: &dyn SkillMatch,
    cv_skills: &[String],
    offer_skills: &[String],
) -> Result<f64, MatchError> {
    let offer_skills = normalize_skills(offer_skills);
    if offer_skills.is_empty() {
        return Err(MatchError::EmptyOfferSkills);
    }

    let cv_skills = normalize_skills(cv_skills);

    let matched = offer_skills
        .iter()
        .filter(|offer_skill| {
            cv_skills
                .iter()
                .any(|cv_skill| strategy.is_match(cv_skill, offer_skill))
        })
        .count();

    Ok(matched as f64 / offer_skills.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partial_overlap_is_fraction_of_offer_skills() {
        // CV {python, sql} vs offer {python, sql, java} -> 2/3
        let score = deterministic_score(
            &ExactMatch,
            &skills(&["python", "sql"]),
            &skills(&["python", "sql", "java"]),
        )
        .unwrap();
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_superset_cv_scores_one() {
        let score = deterministic_score(
            &ExactMatch,
            &skills(&["python", "sql", "docker", "java"]),
            &skills(&["python", "sql"]),
        )
        .unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_disjoint_sets_score_zero() {
        let score = deterministic_score(
            &ExactMatch,
            &skills(&["rust", "go"]),
            &skills(&["python", "sql"]),
        )
        .unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_empty_offer_skills_is_an_error() {
        let err = deterministic_score(&ExactMatch, &skills(&["python"]), &[]).unwrap_err();
        assert_eq!(err, MatchError::EmptyOfferSkills);
    }

    #[test]
    fn test_whitespace_only_offer_skills_is_an_error() {
        let err =
            deterministic_score(&ExactMatch, &skills(&["python"]), &skills(&["  ", ""]))
                .unwrap_err();
        assert_eq!(err, MatchError::EmptyOfferSkills);
    }

    #[test]
    fn test_matching_is_case_insensitive_and_trimmed() {
        let score = deterministic_score(
            &ExactMatch,
            &skills(&["  Python ", "SQL"]),
            &skills(&["python", "sql"]),
        )
        .unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_duplicate_offer_skills_count_once() {
        let score = deterministic_score(
            &ExactMatch,
            &skills(&["python"]),
            &skills(&["python", "Python", "java"]),
        )
        .unwrap();
        // Offer set is {python, java} after normalization -> 1/2
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_exact_strategy_does_not_match_variants() {
        let score = deterministic_score(
            &ExactMatch,
            &skills(&["react"]),
            &skills(&["react.js"]),
        )
        .unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_fuzzy_strategy_matches_variants() {
        let score = deterministic_score(
            &FuzzyMatch,
            &skills(&["react"]),
            &skills(&["react.js"]),
        )
        .unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_same_inputs_same_output() {
        let cv = skills(&["python", "sql", "kafka"]);
        let offer = skills(&["python", "terraform"]);
        let first = deterministic_score(&ExactMatch, &cv, &offer).unwrap();
        let second = deterministic_score(&ExactMatch, &cv, &offer).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_always_in_unit_interval() {
        let cases: Vec<(Vec<String>, Vec<String>)> = vec![
            (skills(&[]), skills(&["a"])),
            (skills(&["a"]), skills(&["a", "b", "c"])),
            (skills(&["a", "b", "c", "d"]), skills(&["a"])),
        ];
        for (cv, offer) in cases {
            let score = deterministic_score(&ExactMatch, &cv, &offer).unwrap();
            assert!((0.0..=1.0).contains(&score), "score {score} out of range");
        }
    }

    #[test]
    fn test_normalize_skills_dedupes_and_drops_empty() {
        let normalized = normalize_skills(&skills(&[" Python", "python ", "", "SQL"]));
        assert_eq!(normalized, vec!["python".to_string(), "sql".to_string()]);
    }
}
