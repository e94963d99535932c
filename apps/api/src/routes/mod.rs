pub mod health;
pub mod openapi;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{cvs, offers};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/openapi.json", get(openapi::openapi_handler))
        // CVs
        .route("/api/v1/cvs", post(cvs::handle_create_cv))
        .route("/api/v1/cvs", get(cvs::handle_list_cvs))
        .route("/api/v1/cvs/:id", get(cvs::handle_get_cv))
        .route("/api/v1/cvs/:id", patch(cvs::handle_update_cv))
        .route("/api/v1/cvs/:id", delete(cvs::handle_delete_cv))
        .route("/api/v1/cvs/:id/extract", post(cvs::handle_extract_cv))
        .route("/api/v1/cvs/:id/score", post(cvs::handle_score_cv))
        .route(
            "/api/v1/cvs/:id/matched-offers",
            get(cvs::handle_matched_offers),
        )
        // Job offers
        .route("/api/v1/offers", post(offers::handle_create_offer))
        .route("/api/v1/offers", get(offers::handle_list_offers))
        .route("/api/v1/offers/:id", get(offers::handle_get_offer))
        .route("/api/v1/offers/:id", patch(offers::handle_update_offer))
        .route("/api/v1/offers/:id", delete(offers::handle_delete_offer))
        .route(
            "/api/v1/offers/:id/matched-cvs",
            get(offers::handle_matched_cvs),
        )
        .with_state(state)
}
