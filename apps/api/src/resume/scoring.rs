use tracing::debug;

use crate::matching::embedding::EmbeddingProvider;
use crate::matching::similarity::{percentage, score};
use crate::matching::MatchError;

/// Percentage similarity between a resume and a job description.
///
/// Blank input on either side scores 0 without touching the model, but an
/// unready model is still reported first.
pub async fn match_score(
    provider: &EmbeddingProvider,
    resume_text: &str,
    job_description: &str,
) -> Result<f64, MatchError> {
    if !provider.is_ready() {
        return Err(MatchError::ModelUnavailable);
    }

    let (resume_text, job_description) = (resume_text.trim(), job_description.trim());
    if resume_text.is_empty() || job_description.is_empty() {
        debug!("Blank resume or job description, scoring 0");
        return Ok(0.0);
    }

    let resume = provider.embed(resume_text).await?;
    let job = provider.embed(job_description).await?;
    Ok(percentage(score(&resume, &job)?))
}
