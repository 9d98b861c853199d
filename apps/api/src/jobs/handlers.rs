use axum::{extract::State, Json};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::AppError;
use crate::extract::AppQuery;
use crate::jobs::adzuna::{JobPosting, JobSearch};
use crate::state::AppState;

fn default_keywords() -> String {
    "software engineer".to_string()
}

fn default_location() -> String {
    "india".to_string()
}

fn default_country() -> String {
    "in".to_string()
}

fn default_page() -> u32 {
    1
}

/// A `page` that is not a number falls back to the first page.
fn lenient_page<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().unwrap_or_else(|_| default_page()))
}

#[derive(Debug, Deserialize)]
pub struct FetchJobsQuery {
    #[serde(default = "default_keywords")]
    pub keywords: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_page", deserialize_with = "lenient_page")]
    pub page: u32,
    #[serde(default = "default_country")]
    pub country: String,
}

#[derive(Debug, Serialize)]
pub struct FetchJobsResponse {
    pub country: String,
    pub total_results: u64,
    pub jobs: Vec<JobPosting>,
}

/// GET /api/fetch_jobs
///
/// Proxies a job search to Adzuna. `country=in` falls back to the US index
/// when Adzuna rejects the Indian endpoint.
pub async fn handle_fetch_jobs(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<FetchJobsQuery>,
) -> Result<Json<FetchJobsResponse>, AppError> {
    let search = JobSearch {
        keywords: query.keywords,
        location: query.location,
        country: query.country.to_lowercase(),
        page: query.page.max(1),
    };

    tracing::info!(
        "Fetching jobs for country={}, location={}, page={}",
        search.country,
        search.location,
        search.page
    );

    let page = state.jobs.search(&search).await?.ok_or_else(|| {
        AppError::Configuration(
            "Adzuna API keys not configured. Please contact the administrator.".to_string(),
        )
    })?;

    Ok(Json(FetchJobsResponse {
        country: search.country,
        total_results: page.total_results,
        jobs: page.jobs,
    }))
}
