//! OpenAPI discovery endpoint. The document is assembled by hand; keep it
//! in sync with `routes::build_router`.

use axum::Json;
use serde_json::{json, Value};

/// GET /api/v1/openapi.json
pub async fn openapi_handler() -> Json<Value> {
    Json(openapi_document())
}

fn page_params() -> Value {
    json!([
        {"name": "page", "in": "query", "schema": {"type": "integer", "minimum": 1}},
        {"name": "page_size", "in": "query", "schema": {"type": "integer", "minimum": 1, "maximum": 500}}
    ])
}

fn match_params() -> Value {
    json!([
        {"name": "min_score", "in": "query", "schema": {"type": "number", "minimum": 0, "maximum": 1}},
        {"name": "page", "in": "query", "schema": {"type": "integer", "minimum": 1}},
        {"name": "page_size", "in": "query", "schema": {"type": "integer", "minimum": 1, "maximum": 500}}
    ])
}

fn id_param() -> Value {
    json!([
        {"name": "id", "in": "path", "required": true, "schema": {"type": "string", "format": "uuid"}}
    ])
}

fn openapi_document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "CV Match API",
            "description": "Stores CVs and job offers, extracts structured candidate data from uploaded documents, and scores CVs against offers with a blend of deterministic skill matching and LLM judgment.",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/health": {
                "get": {"summary": "Service health", "responses": {"200": {"description": "OK"}}}
            },
            "/api/v1/cvs": {
                "post": {
                    "summary": "Upload a CV (multipart: title, file). Extracts raw text and structured data synchronously.",
                    "requestBody": {"content": {"multipart/form-data": {"schema": {
                        "type": "object",
                        "required": ["title", "file"],
                        "properties": {
                            "title": {"type": "string"},
                            "file": {"type": "string", "format": "binary", "description": "PDF or DOCX"}
                        }
                    }}}},
                    "responses": {
                        "201": {"description": "CV stored with extracted fields"},
                        "422": {"description": "EXTRACTION_ERROR — unreadable or unsupported document"},
                        "502": {"description": "LLM_JUDGE_ERROR — provider failure during extraction"}
                    }
                },
                "get": {"summary": "List CVs", "parameters": page_params(), "responses": {"200": {"description": "Paginated CVs"}}}
            },
            "/api/v1/cvs/{id}": {
                "get": {"summary": "Get a CV", "parameters": id_param(), "responses": {"200": {"description": "CV"}, "404": {"description": "Not found"}}},
                "patch": {"summary": "Rename a CV", "parameters": id_param(), "responses": {"200": {"description": "Updated CV"}}},
                "delete": {"summary": "Delete a CV", "parameters": id_param(), "responses": {"204": {"description": "Deleted"}}}
            },
            "/api/v1/cvs/{id}/extract": {
                "post": {"summary": "Re-run extraction from the stored file", "parameters": id_param(),
                         "responses": {"200": {"description": "CV with refreshed extracted fields"}}}
            },
            "/api/v1/cvs/{id}/score": {
                "post": {
                    "summary": "Score this CV against a job offer",
                    "parameters": id_param(),
                    "requestBody": {"content": {"application/json": {"schema": {
                        "type": "object",
                        "required": ["job_offer_id"],
                        "properties": {"job_offer_id": {"type": "string", "format": "uuid"}}
                    }}}},
                    "responses": {
                        "200": {"description": "Stored matching with deterministic_score, llm_score and final_score in [0,1]"},
                        "422": {"description": "INVALID_OFFER — the offer has no required skills"},
                        "502": {"description": "LLM_JUDGE_ERROR — provider call failed; no score persisted"}
                    }
                }
            },
            "/api/v1/cvs/{id}/matched-offers": {
                "get": {"summary": "Offers scored against this CV, best first",
                        "parameters": match_params(), "responses": {"200": {"description": "Paginated matchings"}}}
            },
            "/api/v1/offers": {
                "post": {"summary": "Create a job offer", "responses": {"201": {"description": "Offer"}}},
                "get": {"summary": "List job offers", "parameters": page_params(), "responses": {"200": {"description": "Paginated offers"}}}
            },
            "/api/v1/offers/{id}": {
                "get": {"summary": "Get a job offer", "parameters": id_param(), "responses": {"200": {"description": "Offer"}, "404": {"description": "Not found"}}},
                "patch": {"summary": "Update a job offer", "parameters": id_param(), "responses": {"200": {"description": "Updated offer"}}},
                "delete": {"summary": "Delete a job offer", "parameters": id_param(), "responses": {"204": {"description": "Deleted"}}}
            },
            "/api/v1/offers/{id}/matched-cvs": {
                "get": {"summary": "CVs scored against this offer, best first",
                        "parameters": match_params(), "responses": {"200": {"description": "Paginated matchings"}}}
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_all_routes() {
        let doc = openapi_document();
        let paths = doc["paths"].as_object().unwrap();
        for path in [
            "/health",
            "/api/v1/cvs",
            "/api/v1/cvs/{id}",
            "/api/v1/cvs/{id}/extract",
            "/api/v1/cvs/{id}/score",
            "/api/v1/cvs/{id}/matched-offers",
            "/api/v1/offers",
            "/api/v1/offers/{id}",
            "/api/v1/offers/{id}/matched-cvs",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn test_document_is_openapi_3() {
        let doc = openapi_document();
        assert_eq!(doc["openapi"], "3.0.3");
    }
}
