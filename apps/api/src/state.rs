use std::sync::Arc;

use crate::config::Config;
use crate::courses::recommender::CourseIndex;
use crate::interview::coach::InterviewCoach;
use crate::jobs::adzuna::AdzunaClient;
use crate::matching::embedding::EmbeddingProvider;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Sentence-embedding model handle. Not ready if the model failed to load.
    pub embedder: EmbeddingProvider,
    /// TF-IDF course index. `None` if the catalog could not be loaded.
    pub courses: Option<Arc<CourseIndex>>,
    pub jobs: AdzunaClient,
    /// Pluggable interview backend: `MockCoach` or `LlmCoach`.
    pub coach: Arc<dyn InterviewCoach>,
}
