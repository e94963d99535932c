use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::semantic::{extract_profile, persist_profile};
use crate::extraction::{extract_raw_text, ExtractionError};
use crate::handlers::pagination::{MatchListParams, Page, PageParams};
use crate::models::cv::{
    count_cvs, delete_cv, find_cv, insert_cv, list_cvs, update_cv_title, CvRow,
};
use crate::models::matching::{
    count_matched_offers, list_matched_offers, MatchedOfferRow, MatchingRow,
};
use crate::scoring::score_cv_against_offer;
use crate::state::AppState;

/// POST /api/v1/cvs (multipart: `title`, `file`)
///
/// Stores the file, extracts its raw text, and runs LLM extraction, all
/// before the row is written — a CV that cannot be read is rejected with
/// nothing persisted.
pub async fn handle_create_cv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CvRow>), AppError> {
    let mut title: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("title") => {
                title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(e.to_string()))?,
                );
            }
            Some("file") => {
                file_name = field.file_name().map(|s| s.to_string());
                file_bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(e.to_string()))?
                        .to_vec(),
                );
            }
            _ => {}
        }
    }

    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Missing 'title' field".to_string()))?;
    let file_name =
        file_name.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    let file_bytes =
        file_bytes.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    let raw_text = extract_raw_text(&file_name, &file_bytes)?;
    let profile = extract_profile(state.llm.as_ref(), &raw_text).await?;

    let file_path = store_upload(&state.config.upload_dir, &file_name, &file_bytes).await?;
    info!("Stored CV upload at {file_path}");

    let cv = insert_cv(&state.db, &title, &file_path).await?;
    persist_profile(&state.db, cv.id, &raw_text, &profile).await?;

    let cv = find_cv(&state.db, cv.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {} not found", cv.id)))?;

    Ok((StatusCode::CREATED, Json(cv)))
}

/// GET /api/v1/cvs
pub async fn handle_list_cvs(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<CvRow>>, AppError> {
    let (page, page_size, limit, offset) = params.resolve()?;
    let count = count_cvs(&state.db).await?;
    let results = list_cvs(&state.db, limit, offset).await?;
    Ok(Json(Page::new(count, page, page_size, results)))
}

/// GET /api/v1/cvs/:id
pub async fn handle_get_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CvRow>, AppError> {
    let cv = find_cv(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {id} not found")))?;
    Ok(Json(cv))
}

#[derive(Debug, Deserialize)]
pub struct CvPatch {
    pub title: String,
}

/// PATCH /api/v1/cvs/:id — only the title is caller-editable; every other
/// field belongs to the extractor.
pub async fn handle_update_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<CvPatch>,
) -> Result<Json<CvRow>, AppError> {
    if patch.title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }
    let cv = update_cv_title(&state.db, id, &patch.title)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {id} not found")))?;
    Ok(Json(cv))
}

/// DELETE /api/v1/cvs/:id
pub async fn handle_delete_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if delete_cv(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("CV {id} not found")))
    }
}

/// POST /api/v1/cvs/:id/extract — re-runs extraction from the stored file.
pub async fn handle_extract_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CvRow>, AppError> {
    let cv = find_cv(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {id} not found")))?;

    let file_bytes = tokio::fs::read(&cv.file_path)
        .await
        .map_err(|e| ExtractionError::Parse(format!("Cannot read stored file: {e}")))?;

    let raw_text = extract_raw_text(&cv.file_path, &file_bytes)?;
    let profile = extract_profile(state.llm.as_ref(), &raw_text).await?;
    persist_profile(&state.db, cv.id, &raw_text, &profile).await?;

    let cv = find_cv(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {id} not found")))?;
    Ok(Json(cv))
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub job_offer_id: Uuid,
}

/// POST /api/v1/cvs/:id/score
pub async fn handle_score_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<MatchingRow>, AppError> {
    let matching = score_cv_against_offer(&state, id, req.job_offer_id).await?;
    Ok(Json(matching))
}

/// GET /api/v1/cvs/:id/matched-offers
pub async fn handle_matched_offers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<MatchListParams>,
) -> Result<Json<Page<MatchedOfferRow>>, AppError> {
    // 404 for an unknown CV rather than an empty page.
    find_cv(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {id} not found")))?;

    let min_score = params.min_score()?;
    let (page, page_size, limit, offset) = params.page_params().resolve()?;
    let count = count_matched_offers(&state.db, id, min_score).await?;
    let results = list_matched_offers(&state.db, id, min_score, limit, offset).await?;
    Ok(Json(Page::new(count, page, page_size, results)))
}

/// Writes the uploaded bytes under the upload dir, prefixed with a fresh
/// UUID so concurrent uploads of `cv.pdf` never collide.
async fn store_upload(
    upload_dir: &str,
    file_name: &str,
    bytes: &[u8],
) -> Result<String, AppError> {
    let safe_name: String = file_name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    let path = format!("{}/{}_{}", upload_dir, Uuid::new_v4(), safe_name);

    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to store upload: {e}")))?;
    Ok(path)
}
