//! TF-IDF vectorizer fitted over normalized documents.
//!
//! Tokens are whitespace-separated words of at least two characters.
//! IDF is smoothed: `ln((1 + n) / (1 + df)) + 1`. Output vectors are
//! raw term counts times IDF, scaled to unit L2 norm.

use std::collections::{BTreeSet, HashMap};

use crate::matching::similarity::SparseVector;

const MIN_TOKEN_CHARS: usize = 2;

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
}

impl TfidfVectorizer {
    /// Learns the vocabulary and IDF weights from already-normalized documents.
    /// Vocabulary indices follow lexical order so fitting is deterministic.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for doc in documents {
            let unique: BTreeSet<&str> = tokens(doc.as_ref()).collect();
            for term in unique {
                *document_frequency.entry(term).or_default() += 1;
            }
        }

        let mut terms: Vec<&str> = document_frequency.keys().copied().collect();
        terms.sort_unstable();

        let n = documents.len() as f64;
        let idf = terms
            .iter()
            .map(|t| ((1.0 + n) / (1.0 + document_frequency[t] as f64)).ln() + 1.0)
            .collect();
        let vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect();

        Self { vocabulary, idf }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// Vectorizes a normalized document. Unknown terms are ignored, so text
    /// sharing no vocabulary yields the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let pairs = tokens(text)
            .filter_map(|t| self.vocabulary.get(t))
            .map(|&i| (i, self.idf[i]))
            .collect();
        SparseVector::from_pairs(self.vocabulary_size(), pairs).l2_normalized()
    }
}
