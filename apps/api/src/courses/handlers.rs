//! Axum route handler for course recommendations.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::courses::recommender::CourseRecommendation;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::matching::normalize::{lenient_int, lenient_string, normalize};
use crate::state::AppState;

fn default_top_n() -> i64 {
    5
}

#[derive(Debug, Deserialize)]
pub struct PredictCoursesRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub job_title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub job_description: String,
    #[serde(default = "default_top_n", deserialize_with = "lenient_int")]
    pub top_n: i64,
}

#[derive(Debug, Serialize)]
pub struct PredictCoursesResponse {
    pub courses: Vec<CourseRecommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// POST /api/predict_courses
///
/// Ranks catalog courses against a job title and description.
pub async fn handle_predict_courses(
    State(state): State<AppState>,
    AppJson(request): AppJson<PredictCoursesRequest>,
) -> Result<Json<PredictCoursesResponse>, AppError> {
    if request.job_title.is_empty() && request.job_description.is_empty() {
        return Err(AppError::Validation(
            "Both job_title and job_description are empty".to_string(),
        ));
    }

    let index = state.courses.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable(
            "Model not loaded. Please ensure the course catalog exists.".to_string(),
        )
    })?;

    let query = normalize(&format!("{} {}", request.job_title, request.job_description));
    if query.is_empty() {
        return Ok(Json(PredictCoursesResponse {
            courses: Vec::new(),
            message: Some("Query text is empty after cleaning.".to_string()),
        }));
    }

    let top_n = usize::try_from(request.top_n).unwrap_or(0);
    let courses = index.recommend(&query, top_n, state.config.course_min_score)?;

    Ok(Json(PredictCoursesResponse {
        courses,
        message: None,
    }))
}
