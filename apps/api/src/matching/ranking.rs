use std::cmp::Ordering;

use serde::Serialize;

use crate::matching::similarity::{score, Vector};
use crate::matching::MatchError;

/// A candidate row and its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub index: usize,
    pub score: f64,
}

/// Scores every candidate against `query` and returns the best `top_n` with
/// `score >= min_score`, highest first. Equal scores keep ascending index order.
///
/// Fails on the first candidate whose dimension differs from the query.
pub fn rank<V: Vector>(
    query: &V,
    candidates: &[V],
    top_n: usize,
    min_score: f64,
) -> Result<Vec<RankedCandidate>, MatchError> {
    if top_n == 0 || candidates.is_empty() {
        return Ok(Vec::new());
    }

    let mut scored = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            score(query, candidate).map(|score| RankedCandidate { index, score })
        })
        .collect::<Result<Vec<_>, _>>()?;

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });

    Ok(scored
        .into_iter()
        .filter(|c| c.score >= min_score)
        .take(top_n)
        .collect())
}
