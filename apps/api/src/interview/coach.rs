//! Interview coach: pluggable question generator and answer evaluator.
//!
//! `MockCoach` is deterministic and needs no network. `LlmCoach` asks Claude.
//! `AppState` holds an `Arc<dyn InterviewCoach>`, chosen at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::prompts::{evaluation_prompt, question_prompt};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

/// What to generate questions for.
#[derive(Debug, Clone)]
pub struct QuestionRequest {
    pub job_role: String,
    pub context_keywords: String,
    pub num_technical: usize,
    pub num_behavioral: usize,
    pub num_situational: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    #[serde(default)]
    pub technical_questions: Vec<String>,
    #[serde(default)]
    pub behavioral_questions: Vec<String>,
    #[serde(default)]
    pub situational_questions: Vec<String>,
}

impl QuestionSet {
    /// Trims each category to the requested count.
    pub fn truncated_to(mut self, request: &QuestionRequest) -> Self {
        self.technical_questions.truncate(request.num_technical);
        self.behavioral_questions.truncate(request.num_behavioral);
        self.situational_questions.truncate(request.num_situational);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerEvaluation {
    pub score: u32, // 0 – 100
    pub feedback_text: String,
}

#[async_trait]
pub trait InterviewCoach: Send + Sync {
    /// Backend label reported by `/health`.
    fn name(&self) -> &'static str;

    async fn generate_questions(&self, request: &QuestionRequest) -> Result<QuestionSet, AppError>;

    async fn evaluate_answer(
        &self,
        job_title: &str,
        question: &str,
        answer: &str,
    ) -> Result<AnswerEvaluation, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// MockCoach
// ────────────────────────────────────────────────────────────────────────────

const TECHNICAL_BANK: &[&str] = &[
    "Explain the difference between a process and a thread.",
    "Describe the concept of RESTful APIs.",
    "What is a primary key in a database and why is it important?",
    "How would you find and fix a memory leak in a long-running service?",
    "What trade-offs do you weigh when choosing between SQL and NoSQL storage?",
];

const BEHAVIORAL_BANK: &[&str] = &[
    "Tell me about a time you had to learn a new technology quickly.",
    "Describe a challenging project you worked on and how you handled it.",
    "Tell me about a time you received critical feedback. What did you change?",
    "Describe a situation where you had to work with a difficult teammate.",
];

const SITUATIONAL_BANK: &[&str] = &[
    "Imagine a critical bug is found in production just before a major holiday. What do you do?",
    "If you disagreed with a senior developer's technical approach, how would you handle it?",
    "Your team will miss a committed deadline by two weeks. How do you communicate it?",
    "A stakeholder asks for a feature that conflicts with the current roadmap. What do you do?",
];

/// Offline coach with a fixed question bank and a length-based score.
pub struct MockCoach;

fn take_bank(bank: &[&str], n: usize) -> Vec<String> {
    bank.iter().take(n).map(|q| q.to_string()).collect()
}

/// 60 for a one-word answer, rising half a point per word, capped at 95.
fn mock_score(answer: &str) -> u32 {
    let words = answer.split_whitespace().count() as u32;
    (60 + words / 2).min(95)
}

#[async_trait]
impl InterviewCoach for MockCoach {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate_questions(&self, request: &QuestionRequest) -> Result<QuestionSet, AppError> {
        Ok(QuestionSet {
            technical_questions: take_bank(TECHNICAL_BANK, request.num_technical),
            behavioral_questions: take_bank(BEHAVIORAL_BANK, request.num_behavioral),
            situational_questions: take_bank(SITUATIONAL_BANK, request.num_situational),
        })
    }

    async fn evaluate_answer(
        &self,
        _job_title: &str,
        _question: &str,
        answer: &str,
    ) -> Result<AnswerEvaluation, AppError> {
        let score = mock_score(answer);
        let feedback_text = if score >= 85 {
            format!("Thorough answer that covers the key concepts in depth. Score: {score}.")
        } else if score >= 70 {
            format!("Solid answer. The key concepts were mentioned clearly. Score: {score}.")
        } else {
            format!("The answer is brief. Add a concrete example to show depth. Score: {score}.")
        };
        Ok(AnswerEvaluation {
            score,
            feedback_text,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmCoach
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LlmEvaluation {
    #[serde(default)]
    score: f64,
    #[serde(default)]
    feedback_text: Option<String>,
}

/// Coach backed by Claude through the shared `LlmClient`.
pub struct LlmCoach(pub LlmClient);

#[async_trait]
impl InterviewCoach for LlmCoach {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn generate_questions(&self, request: &QuestionRequest) -> Result<QuestionSet, AppError> {
        let prompt = question_prompt(
            &request.job_role,
            &request.context_keywords,
            request.num_technical,
            request.num_behavioral,
            request.num_situational,
        );
        let questions: QuestionSet = self
            .0
            .call_json(&prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))?;
        Ok(questions.truncated_to(request))
    }

    async fn evaluate_answer(
        &self,
        job_title: &str,
        question: &str,
        answer: &str,
    ) -> Result<AnswerEvaluation, AppError> {
        let prompt = evaluation_prompt(job_title, question, answer);
        let evaluation: LlmEvaluation = self
            .0
            .call_json(&prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Answer evaluation failed: {e}")))?;

        Ok(AnswerEvaluation {
            score: evaluation.score.clamp(0.0, 100.0).round() as u32,
            feedback_text: evaluation
                .feedback_text
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "Could not generate feedback.".to_string()),
        })
    }
}
