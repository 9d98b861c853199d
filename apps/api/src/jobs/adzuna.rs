//! Adzuna job search client.
//!
//! A request for India (`in`) that the upstream rejects with an HTTP error
//! status is retried once against the US index; free Adzuna plans do not
//! always serve the Indian endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

const RESULTS_PER_PAGE: u32 = 20;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const PRIMARY_COUNTRY: &str = "in";
const FALLBACK_COUNTRY: &str = "us";
const FALLBACK_LOCATION: &str = "usa";

#[derive(Debug, Error)]
pub enum JobsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Adzuna returned status {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone)]
pub struct JobSearch {
    pub keywords: String,
    pub location: String,
    pub country: String,
    pub page: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DisplayName {
    display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Category {
    label: Option<String>,
}

/// Raw job record as Adzuna returns it.
#[derive(Debug, Clone, Deserialize)]
struct AdzunaJob {
    id: Option<Value>,
    title: Option<String>,
    #[serde(default)]
    company: Option<DisplayName>,
    #[serde(default)]
    location: Option<DisplayName>,
    salary_is_predicted: Option<Value>,
    description: Option<String>,
    redirect_url: Option<String>,
    created: Option<String>,
    contract_type: Option<String>,
    contract_time: Option<String>,
    #[serde(default)]
    category: Option<Category>,
}

#[derive(Debug, Deserialize)]
struct AdzunaSearchResponse {
    #[serde(default)]
    results: Vec<AdzunaJob>,
    #[serde(default)]
    count: u64,
}

/// Flattened job posting returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPosting {
    pub id: Option<Value>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary_is_predicted: Option<Value>,
    pub description: Option<String>,
    pub redirect_url: Option<String>,
    pub created: Option<String>,
    pub contract_type: Option<String>,
    pub contract_time: Option<String>,
    pub category: Option<String>,
}

impl From<AdzunaJob> for JobPosting {
    fn from(job: AdzunaJob) -> Self {
        Self {
            id: job.id,
            title: job.title,
            company: job.company.and_then(|c| c.display_name),
            location: job.location.and_then(|l| l.display_name),
            salary_is_predicted: job.salary_is_predicted,
            description: job.description,
            redirect_url: job.redirect_url,
            created: job.created,
            contract_type: job.contract_type,
            contract_time: job.contract_time,
            category: job.category.and_then(|c| c.label),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobPage {
    pub jobs: Vec<JobPosting>,
    pub total_results: u64,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub app_id: String,
    pub app_key: String,
}

#[derive(Clone)]
pub struct AdzunaClient {
    client: Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl AdzunaClient {
    pub fn new(base_url: &str, credentials: Option<Credentials>) -> Result<Self, JobsError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Searches Adzuna. Returns `None` when no credentials are configured.
    pub async fn search(&self, search: &JobSearch) -> Result<Option<JobPage>, JobsError> {
        let Some(credentials) = &self.credentials else {
            return Ok(None);
        };

        match self.fetch(credentials, search).await {
            Err(JobsError::Api { status, .. }) if search.country == PRIMARY_COUNTRY => {
                warn!(
                    "Adzuna '{PRIMARY_COUNTRY}' request failed ({status}); \
                     falling back to '{FALLBACK_COUNTRY}'"
                );
                let fallback = JobSearch {
                    country: FALLBACK_COUNTRY.to_string(),
                    location: FALLBACK_LOCATION.to_string(),
                    ..search.clone()
                };
                self.fetch(credentials, &fallback).await.map(Some)
            }
            other => other.map(Some),
        }
    }

    async fn fetch(
        &self,
        credentials: &Credentials,
        search: &JobSearch,
    ) -> Result<JobPage, JobsError> {
        let url = format!("{}/{}/search/{}", self.base_url, search.country, search.page);
        info!(
            "Fetching Adzuna jobs from {url} (what='{}', where='{}')",
            search.keywords, search.location
        );

        let per_page = RESULTS_PER_PAGE.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("app_id", credentials.app_id.as_str()),
                ("app_key", credentials.app_key.as_str()),
                ("results_per_page", per_page.as_str()),
                ("what", search.keywords.as_str()),
                ("where", search.location.as_str()),
                ("sort_by", "date"),
                ("content-type", "application/json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(JobsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: AdzunaSearchResponse = response.json().await?;
        Ok(JobPage {
            total_results: body.count,
            jobs: body.results.into_iter().map(JobPosting::from).collect(),
        })
    }
}
