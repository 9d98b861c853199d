// Prompt templates for the LLM interview coach.
// Placeholders in {braces} are replaced before sending.

pub const QUESTION_PROMPT_TEMPLATE: &str = r#"Generate a set of interview questions for a '{job_role}' position.
The job context involves: '{context}'.

Provide exactly:
- {num_technical} technical questions
- {num_behavioral} behavioral questions
- {num_situational} situational questions

Return a JSON object with this exact shape:
{
  "technical_questions": ["..."],
  "behavioral_questions": ["..."],
  "situational_questions": ["..."]
}"#;

pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"Context: The candidate is interviewing for a '{job_title}' position.
Question: "{question}"
Candidate's Answer: "{answer}"

Evaluate the answer. Give constructive feedback and a score from 0 to 100.

Return a JSON object with this exact shape:
{
  "score": 0,
  "feedback_text": "..."
}"#;

/// Replaces each `{name}` placeholder in one left-to-right pass. Substituted
/// text is never rescanned, and braces that do not name a placeholder are
/// kept as written.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let placeholder = after
            .find('}')
            .map(|end| &after[..end])
            .and_then(|key| values.iter().find(|(name, _)| *name == key));
        match placeholder {
            Some((name, value)) => {
                out.push_str(value);
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn question_prompt(
    job_role: &str,
    context: &str,
    num_technical: usize,
    num_behavioral: usize,
    num_situational: usize,
) -> String {
    let (technical, behavioral, situational) = (
        num_technical.to_string(),
        num_behavioral.to_string(),
        num_situational.to_string(),
    );
    fill_template(
        QUESTION_PROMPT_TEMPLATE,
        &[
            ("job_role", job_role),
            ("context", context),
            ("num_technical", technical.as_str()),
            ("num_behavioral", behavioral.as_str()),
            ("num_situational", situational.as_str()),
        ],
    )
}

pub fn evaluation_prompt(job_title: &str, question: &str, answer: &str) -> String {
    fill_template(
        EVALUATION_PROMPT_TEMPLATE,
        &[
            ("job_title", job_title),
            ("question", question),
            ("answer", answer),
        ],
    )
}
