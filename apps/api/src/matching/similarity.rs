//! Cosine similarity over dense embeddings and sparse TF-IDF vectors.
//!
//! Scores are clamped to `[0, 1]`; a zero-norm vector scores 0 against anything.

use serde::{Deserialize, Serialize};

use crate::matching::MatchError;

/// Common surface for anything that can be compared with cosine similarity.
pub trait Vector {
    /// Number of dimensions. Two vectors are only comparable when this matches.
    fn dim(&self) -> usize;

    fn dot(&self, other: &Self) -> f64;

    fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

/// Dense embedding produced by a sentence-embedding model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(pub Vec<f32>);

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

impl Vector for Embedding {
    fn dim(&self) -> usize {
        self.0.len()
    }

    fn dot(&self, other: &Self) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| f64::from(*a) * f64::from(*b))
            .sum()
    }
}

/// Sparse vector over a fixed vocabulary. `indices` are strictly ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    dim: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Builds a sparse vector from `(index, value)` pairs. Pairs are sorted,
    /// zero values dropped, and duplicate indices summed.
    pub fn from_pairs(dim: usize, mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_by_key(|(i, _)| *i);
        let mut indices = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (i, v) in pairs {
            if indices.last() == Some(&i) {
                if let Some(last) = values.last_mut() {
                    *last += v;
                }
            } else {
                indices.push(i);
                values.push(v);
            }
        }
        let (indices, values) = indices
            .into_iter()
            .zip(values)
            .filter(|(_, v)| *v != 0.0)
            .unzip();
        Self {
            dim,
            indices,
            values,
        }
    }

    #[cfg(test)]
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    #[cfg(test)]
    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns a copy scaled to unit L2 norm. Zero vectors are returned as-is.
    pub fn l2_normalized(&self) -> Self {
        let norm = self.norm();
        if norm == 0.0 {
            return self.clone();
        }
        Self {
            dim: self.dim,
            indices: self.indices.clone(),
            values: self.values.iter().map(|v| v / norm).collect(),
        }
    }
}

impl Vector for SparseVector {
    fn dim(&self) -> usize {
        self.dim
    }

    fn dot(&self, other: &Self) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Cosine similarity clamped to `[0, 1]`.
pub fn score<V: Vector>(a: &V, b: &V) -> Result<f64, MatchError> {
    if a.dim() != b.dim() {
        return Err(MatchError::DimensionMismatch {
            left: a.dim(),
            right: b.dim(),
        });
    }

    let denom = a.norm() * b.norm();
    if denom == 0.0 || !denom.is_finite() {
        return Ok(0.0);
    }

    let cosine = a.dot(b) / denom;
    if cosine.is_nan() {
        return Ok(0.0);
    }
    Ok(cosine.clamp(0.0, 1.0))
}

/// Scales a similarity to a percentage in `[0, 100]`, two decimals.
pub fn percentage(similarity: f64) -> f64 {
    round_to(similarity.clamp(0.0, 1.0) * 100.0, 2)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
