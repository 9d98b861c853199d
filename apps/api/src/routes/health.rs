use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::routes::ENDPOINTS;
use crate::state::AppState;

/// GET /
/// Service banner and the list of available endpoints.
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "message": "Job Portal API is running",
        "available_endpoints": ENDPOINTS,
    }))
}

/// GET /health
/// Reports which model-backed components finished loading.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "portal-api",
        "components": {
            "embedding_model": {
                "ready": state.embedder.is_ready(),
                "model": state.embedder.model_name(),
            },
            "course_index": {
                "ready": state.courses.is_some(),
                "courses": state.courses.as_ref().map(|c| c.len()),
            },
            "job_search": {
                "configured": state.jobs.is_configured(),
            },
            "interview_coach": state.coach.name(),
        }
    }))
}
