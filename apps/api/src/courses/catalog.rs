use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One row of the course catalog. Every field is optional in the source file;
/// accessors supply the display defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(default, alias = "course_title")]
    pub title: Option<String>,
    #[serde(default, alias = "Course URL")]
    pub url: Option<String>,
    #[serde(default, alias = "course_skills")]
    pub skills: Option<String>,
    #[serde(default, alias = "course_description")]
    pub description: Option<String>,
}

impl CourseRecord {
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("N/A")
    }

    pub fn url_or_default(&self) -> &str {
        self.url.as_deref().unwrap_or("#")
    }

    pub fn skills_or_default(&self) -> &str {
        self.skills.as_deref().unwrap_or("N/A")
    }

    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Raw text the TF-IDF index is fitted on.
    pub fn searchable_text(&self) -> String {
        [
            self.title.as_deref(),
            self.skills.as_deref(),
            self.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// First 200 characters of the description followed by an ellipsis.
    pub fn description_snippet(&self) -> String {
        let snippet: String = self.description_or_default().chars().take(200).collect();
        format!("{snippet}...")
    }
}

/// Reads a JSON array of course records from disk.
pub async fn load_catalog(path: &Path) -> Result<Vec<CourseRecord>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read course catalog at {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Course catalog at {} is not a JSON array of courses", path.display()))
}
