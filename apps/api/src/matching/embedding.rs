//! Embedding Provider: turns text into dense vectors through an injected model.
//!
//! The model handle is decided once at startup. A provider built without one
//! is "not ready" and rejects every call with `MatchError::ModelUnavailable`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::matching::similarity::Embedding;
use crate::matching::MatchError;

const EMBED_TIMEOUT_SECS: u64 = 30;
const PROBE_TEXT: &str = "readiness probe";

/// A loaded sentence-embedding model.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Model identifier, e.g. `all-minilm`.
    fn name(&self) -> &str;

    /// Output dimensionality, fixed for the lifetime of the model.
    fn dims(&self) -> usize;

    async fn encode(&self, text: &str) -> anyhow::Result<Vec<f32>>;
}

/// Shared, read-only embedding front door held in `AppState`.
#[derive(Clone)]
pub struct EmbeddingProvider {
    model: Option<Arc<dyn EmbeddingModel>>,
}

impl EmbeddingProvider {
    pub fn new(model: Arc<dyn EmbeddingModel>) -> Self {
        Self { model: Some(model) }
    }

    /// A provider whose model failed to load.
    pub fn unavailable() -> Self {
        Self { model: None }
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model.as_deref().map(|m| m.name())
    }

    pub async fn embed(&self, text: &str) -> Result<Embedding, MatchError> {
        let model = self.model.as_ref().ok_or(MatchError::ModelUnavailable)?;
        let values = model.encode(text).await.map_err(MatchError::Backend)?;
        if values.len() != model.dims() {
            return Err(MatchError::DimensionMismatch {
                left: model.dims(),
                right: values.len(),
            });
        }
        Ok(Embedding(values))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Ollama-compatible HTTP backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

/// Embedding model served over HTTP by an Ollama-compatible server.
pub struct OllamaEmbedder {
    client: Client,
    base_url: String,
    model: String,
    dims: usize,
}

impl OllamaEmbedder {
    /// Connects to the server and embeds a probe string to confirm the model
    /// is present and learn its dimensionality.
    pub async fn load(base_url: &str, model: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(EMBED_TIMEOUT_SECS))
            .build()
            .context("Failed to build embedding HTTP client")?;

        let mut embedder = Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            dims: 0,
        };

        let probe = embedder
            .request(PROBE_TEXT)
            .await
            .with_context(|| format!("Embedding model '{model}' did not answer the probe"))?;
        if probe.is_empty() {
            return Err(anyhow!("Embedding model '{model}' returned an empty vector"));
        }
        embedder.dims = probe.len();

        info!(
            "Embedding model '{}' ready at {} ({} dims)",
            embedder.model, embedder.base_url, embedder.dims
        );
        Ok(embedder)
    }

    async fn request(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&EmbedRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await
            .context("Embedding request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Embedding server returned {status}: {body}"));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .context("Embedding response was not valid JSON")?;
        debug!("Embedded {} chars into {} dims", text.len(), parsed.embedding.len());
        Ok(parsed.embedding)
    }
}

#[async_trait]
impl EmbeddingModel for OllamaEmbedder {
    fn name(&self) -> &str {
        &self.model
    }

    fn dims(&self) -> usize {
        self.dims
    }

    async fn encode(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.request(text).await
    }
}
