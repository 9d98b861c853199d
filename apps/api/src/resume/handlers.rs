//! Axum route handler for resume match scoring.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;
use crate::matching::MatchError;
use crate::resume::pdf::extract_pdf_text;
use crate::resume::scoring::match_score;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume_file";
const JOB_DESCRIPTION_FIELD: &str = "job_description_text";

#[derive(Debug, Serialize)]
pub struct MatchScoreResponse {
    pub match_score: f64,
}

/// POST /api/match_score
///
/// Multipart form: `resume_file` (PDF) and `job_description_text`.
/// Returns the embedding similarity between the two as a percentage.
pub async fn handle_match_score(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MatchScoreResponse>, AppError> {
    if !state.embedder.is_ready() {
        return Err(MatchError::ModelUnavailable.into());
    }
    let mut multipart = multipart?;

    let mut resume: Option<Bytes> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Could not read resume upload: {e}"))
                })?;
                resume = Some(data);
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Could not read job description: {e}"))
                })?;
                job_description = Some(text);
            }
            _ => {}
        }
    }

    let resume =
        resume.ok_or_else(|| AppError::Validation("No resume file uploaded.".to_string()))?;
    let job_description = job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Job description text missing.".to_string()))?;

    let resume_text = extract_pdf_text(resume).await?;
    tracing::info!(
        "Scoring resume ({} chars) against job description ({} chars)",
        resume_text.len(),
        job_description.len()
    );

    let score = match_score(&state.embedder, &resume_text, &job_description).await?;
    Ok(Json(MatchScoreResponse { match_score: score }))
}
