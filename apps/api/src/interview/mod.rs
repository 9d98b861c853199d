// Interview practice: question generation and answer evaluation.
// Backends sit behind the InterviewCoach trait (mock or LLM).

pub mod coach;
pub mod evaluation;
pub mod handlers;
pub mod prompts;
