// Shared prompt constants and prompt-building utilities.
// Modules that need an LLM call build their prompts here so the wording
// lives in one place.

/// System prompt for CV structured extraction.
pub const EXTRACT_SYSTEM: &str = "You are an expert in recruitment (ATS). \
    You extract structured candidate information from raw CV text. \
    You MUST respond with valid JSON only, matching the requested schema exactly. \
    Do NOT use markdown code fences.";

/// System prompt for the scoring judge.
pub const JUDGE_SYSTEM: &str = "You are a Technical Recruitment Expert \
    (Senior Talent Acquisition). You audit a candidate CV against a job offer \
    and produce a numeric fit judgment with human and semantic nuance. \
    You MUST respond with valid JSON only, matching the requested schema exactly. \
    Do NOT use markdown code fences.";

/// Builds the structured-extraction prompt for a raw CV text.
pub fn extraction_prompt(raw_text: &str) -> String {
    format!(
        r#"Extract structured information from the plain text of the CV below.

IMPORTANT: Extract all information in the SAME LANGUAGE as the CV.

For `year_experience`, calculate the total cumulated experience years.
For `diploma_ranking`, rank the highest diploma: PhD=8, Master/Engineer=5, Bachelor=3, BTS/DUT=2, High School Diploma=1.
For `experiences`, extract per company: role, company name, duration/period, contract type, work type, and a concise summary (2-3 sentences) of the most impactful contributions and key technologies.
For `skills`, list technical and soft skills as short tokens.

Return a JSON object with exactly these fields:
{{
  "name": string or null,
  "website": string or null,
  "phone_number": string or null,
  "email": string or null,
  "description": string or null,
  "skills": [string],
  "diploma": string or null,
  "diploma_ranking": integer,
  "year_experience": integer,
  "experiences": [string],
  "languages": [string],
  "certifications": [string]
}}

Raw CV text:
{raw_text}"#
    )
}

/// Builds the judge prompt from raw CV text and rendered offer text.
pub fn judge_prompt(cv_text: &str, offer_text: &str) -> String {
    format!(
        r#"### INPUT DATA
1. JOB OFFER:
{offer_text}

2. CANDIDATE CV (raw text):
{cv_text}

### INSTRUCTIONS
- Judge how well the candidate fits the offer: skills (including synonyms the
  raw text may phrase differently, e.g. 'React' vs 'ReactJS'), experience,
  education relevance, languages, and how past assignments match the role.
- `score` is your overall fit judgment from 0 to 100.
- `strengths`: bonus experience, high qualifications, certificates, etc.
- `weaknesses`: points to watch out for.
- `missing_skills`: key skills lacking in relation to the offer.
- `summary`: overall summary and final opinion of the recruiter (3 lines max).

Return a JSON object with exactly these fields:
{{
  "score": number,
  "strengths": [string],
  "weaknesses": [string],
  "missing_skills": [string],
  "summary": string
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_prompt_embeds_raw_text() {
        let prompt = extraction_prompt("Jane Doe, Python developer");
        assert!(prompt.contains("Jane Doe, Python developer"));
        assert!(prompt.contains("diploma_ranking"));
    }

    #[test]
    fn test_judge_prompt_embeds_both_texts() {
        let prompt = judge_prompt("CV TEXT HERE", "OFFER TEXT HERE");
        assert!(prompt.contains("CV TEXT HERE"));
        assert!(prompt.contains("OFFER TEXT HERE"));
        assert!(prompt.contains("missing_skills"));
    }
}
