use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::interview::coach::InterviewCoach;
use crate::matching::normalize::lenient_string;
use crate::matching::similarity::round_to;

pub const UNANSWERED_FEEDBACK: &str = "This question was not answered.";

/// One question/answer pair submitted by the candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct AnsweredQuestion {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub question: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionFeedback {
    pub question_id: Option<Value>,
    pub score: u32,
    pub feedback_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub score: f64,
    pub feedback: String,
    pub detailed_feedback: Vec<QuestionFeedback>,
}

/// Scores every answered question with the coach. Blank answers score 0 and
/// are left out of the average.
pub async fn evaluate_answers(
    coach: &dyn InterviewCoach,
    job_title: &str,
    items: &[AnsweredQuestion],
) -> Result<EvaluationReport, AppError> {
    info!(
        "Evaluating {} answers for role '{job_title}' with the {} coach",
        items.len(),
        coach.name()
    );

    let mut detailed_feedback = Vec::with_capacity(items.len());
    let mut total_score = 0_u64;
    let mut evaluated = 0_u64;

    for item in items {
        if item.answer.trim().is_empty() {
            detailed_feedback.push(QuestionFeedback {
                question_id: item.id.clone(),
                score: 0,
                feedback_text: UNANSWERED_FEEDBACK.to_string(),
            });
            continue;
        }

        let result = coach
            .evaluate_answer(job_title, &item.question, &item.answer)
            .await?;
        total_score += u64::from(result.score);
        evaluated += 1;
        detailed_feedback.push(QuestionFeedback {
            question_id: item.id.clone(),
            score: result.score,
            feedback_text: result.feedback_text,
        });
    }

    let average = if evaluated > 0 {
        total_score as f64 / evaluated as f64
    } else {
        0.0
    };

    Ok(EvaluationReport {
        score: round_to(average, 2),
        feedback: overall_feedback(average),
        detailed_feedback,
    })
}

/// Summary line for the whole interview.
pub fn overall_feedback(average: f64) -> String {
    let verdict = if average > 80.0 {
        "Excellent performance! You demonstrated strong knowledge."
    } else if average > 60.0 {
        "Good effort. There are areas where you can provide more depth."
    } else {
        "Needs improvement. Focus on reviewing the key concepts for this role."
    };
    format!("Your overall average score is {average:.0}%. {verdict}")
}
