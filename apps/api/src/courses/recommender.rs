//! Course recommender: TF-IDF candidate matrix over the course catalog.
//!
//! Built once at startup, then shared read-only across requests.

use serde::Serialize;
use tracing::debug;

use crate::courses::catalog::CourseRecord;
use crate::matching::normalize::normalize;
use crate::matching::ranking::rank;
use crate::matching::similarity::{percentage, round_to, SparseVector};
use crate::matching::tfidf::TfidfVectorizer;
use crate::matching::MatchError;

/// A recommended course as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CourseRecommendation {
    pub id: String,
    pub name: String,
    pub url: String,
    pub skills_taught: String,
    pub description_snippet: String,
    pub relevance: String,
    pub similarity_score: f64,
}

pub struct CourseIndex {
    vectorizer: TfidfVectorizer,
    matrix: Vec<SparseVector>,
    records: Vec<CourseRecord>,
}

impl CourseIndex {
    pub fn build(records: Vec<CourseRecord>) -> Self {
        let documents: Vec<String> = records
            .iter()
            .map(|r| normalize(&r.searchable_text()))
            .collect();
        let vectorizer = TfidfVectorizer::fit(&documents);
        let matrix = documents.iter().map(|d| vectorizer.transform(d)).collect();

        Self {
            vectorizer,
            matrix,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    /// Ranks courses against an already-normalized query.
    pub fn recommend(
        &self,
        normalized_query: &str,
        top_n: usize,
        min_score: f64,
    ) -> Result<Vec<CourseRecommendation>, MatchError> {
        let query = self.vectorizer.transform(normalized_query);
        let ranked = rank(&query, &self.matrix, top_n, min_score)?;
        debug!(
            "Course query matched {} of {} courses (top_n={top_n}, min_score={min_score})",
            ranked.len(),
            self.records.len()
        );

        Ok(ranked
            .into_iter()
            .map(|c| {
                let course = &self.records[c.index];
                CourseRecommendation {
                    id: format!("course_{}", c.index),
                    name: course.title_or_default().to_string(),
                    url: course.url_or_default().to_string(),
                    skills_taught: course.skills_or_default().to_string(),
                    description_snippet: course.description_snippet(),
                    relevance: relevance_label(percentage(c.score)),
                    similarity_score: round_to(c.score, 4),
                }
            })
            .collect())
    }
}

/// Percentage label with at least one decimal, e.g. `"100.0%"`, `"70.71%"`.
fn relevance_label(percent: f64) -> String {
    if percent.fract() == 0.0 {
        format!("{percent:.1}%")
    } else {
        format!("{percent}%")
    }
}
