// Matching core: text normalization, embeddings, cosine scoring, ranking.
// Pure and stateless apart from the injected, read-only embedding model.

pub mod embedding;
pub mod normalize;
pub mod ranking;
pub mod similarity;
pub mod tfidf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("embedding model is not loaded")]
    ModelUnavailable,

    #[error("vector dimensions differ ({left} vs {right})")]
    DimensionMismatch { left: usize, right: usize },

    #[error("embedding backend failed: {0}")]
    Backend(#[source] anyhow::Error),
}
