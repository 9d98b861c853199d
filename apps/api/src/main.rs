mod config;
mod courses;
mod errors;
mod extract;
mod interview;
mod jobs;
mod llm_client;
mod matching;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::courses::catalog::load_catalog;
use crate::courses::recommender::CourseIndex;
use crate::interview::coach::{InterviewCoach, LlmCoach, MockCoach};
use crate::jobs::adzuna::{AdzunaClient, Credentials};
use crate::llm_client::LlmClient;
use crate::matching::embedding::{EmbeddingProvider, OllamaEmbedder};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portal API v{}", env!("CARGO_PKG_VERSION"));

    // Sentence embeddings for /api/match_score
    let embedder = match OllamaEmbedder::load(&config.embedding_url, &config.embedding_model).await
    {
        Ok(model) => EmbeddingProvider::new(Arc::new(model)),
        Err(e) => {
            error!("Embedding model failed to load, match scoring disabled: {e:#}");
            EmbeddingProvider::unavailable()
        }
    };

    // TF-IDF index for /api/predict_courses
    let courses = match load_catalog(&config.course_catalog_path).await {
        Ok(records) => {
            let index = CourseIndex::build(records);
            if index.is_empty() {
                warn!(
                    "Course catalog {} is empty; recommendations will be empty",
                    config.course_catalog_path.display()
                );
            }
            info!(
                "Course index built: {} courses, {} terms",
                index.len(),
                index.vocabulary_size()
            );
            Some(Arc::new(index))
        }
        Err(e) => {
            error!("Course catalog failed to load, recommendations disabled: {e:#}");
            None
        }
    };

    let credentials = match (&config.adzuna_app_id, &config.adzuna_app_key) {
        (Some(app_id), Some(app_key)) => Some(Credentials {
            app_id: app_id.clone(),
            app_key: app_key.clone(),
        }),
        _ => {
            warn!("ADZUNA_API_ID / ADZUNA_API_KEY not set; job search disabled");
            None
        }
    };
    let jobs = AdzunaClient::new(&config.adzuna_base_url, credentials)?;

    let coach: Arc<dyn InterviewCoach> = match &config.anthropic_api_key {
        Some(key) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(LlmCoach(LlmClient::new(key.clone())?))
        }
        None => Arc::new(MockCoach),
    };
    info!("Interview coach: {}", coach.name());

    let state = AppState {
        config: config.clone(),
        embedder,
        courses,
        jobs,
        coach,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
