//! Axum route handlers for interview practice.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::interview::coach::{QuestionRequest, QuestionSet};
use crate::interview::evaluation::{evaluate_answers, AnsweredQuestion, EvaluationReport};
use crate::state::AppState;

/// Upper bound per category, keeps prompts and responses small.
const MAX_QUESTIONS_PER_CATEGORY: usize = 10;

fn default_technical() -> usize {
    3
}

fn default_behavioral() -> usize {
    2
}

fn default_situational() -> usize {
    2
}

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub job_role: Option<String>,
    #[serde(default)]
    pub context_keywords: Option<String>,
    #[serde(default = "default_technical")]
    pub num_technical: usize,
    #[serde(default = "default_behavioral")]
    pub num_behavioral: usize,
    #[serde(default = "default_situational")]
    pub num_situational: usize,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: QuestionSet,
}

#[derive(Debug, Deserialize)]
pub struct JobDetails {
    pub title: Option<String>,
    // Accepted for client compatibility; evaluation prompts only use the title.
    #[allow(dead_code)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateAnswersRequest {
    pub job_details: Option<JobDetails>,
    pub questions_and_answers: Option<Vec<AnsweredQuestion>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate_interview_questions
///
/// Technical, behavioral and situational questions for a role.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    AppJson(request): AppJson<GenerateQuestionsRequest>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    let job_role = request
        .job_role
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Job role is a required field.".to_string()))?;

    let question_request = QuestionRequest {
        job_role,
        context_keywords: request.context_keywords.unwrap_or_default(),
        num_technical: request.num_technical.min(MAX_QUESTIONS_PER_CATEGORY),
        num_behavioral: request.num_behavioral.min(MAX_QUESTIONS_PER_CATEGORY),
        num_situational: request.num_situational.min(MAX_QUESTIONS_PER_CATEGORY),
    };

    tracing::info!(
        "Generating questions for role '{}' with the {} coach",
        question_request.job_role,
        state.coach.name()
    );

    let questions = state.coach.generate_questions(&question_request).await?;
    Ok(Json(GenerateQuestionsResponse { questions }))
}

/// POST /api/evaluate_answers
///
/// Scores each answer and returns the average plus per-question feedback.
pub async fn handle_evaluate_answers(
    State(state): State<AppState>,
    AppJson(request): AppJson<EvaluateAnswersRequest>,
) -> Result<Json<EvaluationReport>, AppError> {
    let (Some(job_details), Some(items)) = (request.job_details, request.questions_and_answers)
    else {
        return Err(AppError::Validation(
            "Missing required job_details or questions_and_answers.".to_string(),
        ));
    };

    let job_title = job_details
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "a relevant role".to_string());

    let report = evaluate_answers(state.coach.as_ref(), &job_title, &items).await?;
    Ok(Json(report))
}
