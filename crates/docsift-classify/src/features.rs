// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text featurization — tokenizer and TF-IDF vectorizer. The transform is
// deterministic and stateless at call time: a fitted vectorizer maps any
// text to a fixed-length numeric vector.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lowercase a text and split it into alphanumeric tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
        .collect()
}

/// TF-IDF vectorizer.
///
/// `fit` builds the vocabulary (in first-seen token order) and the smoothed
/// inverse document frequencies from a training corpus; `transform` then maps
/// any text to a vector of length `dimension()`. Tokens outside the fitted
/// vocabulary are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Token -> feature index.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    idf: Vec<f64>,
    /// Number of documents seen during fitting.
    document_count: usize,
}

impl TfidfVectorizer {
    /// Fit a vectorizer on a corpus of documents.
    pub fn fit(documents: &[&str]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for document in documents {
            let tokens = tokenize(document);
            let unique: HashSet<&String> = tokens.iter().collect();
            for token in &tokens {
                if !vocabulary.contains_key(token) {
                    let index = vocabulary.len();
                    vocabulary.insert(token.clone(), index);
                }
            }
            for token in unique {
                *document_frequency.entry(token.clone()).or_insert(0) += 1;
            }
        }

        // Smoothed IDF: ln((N + 1) / (df + 1)) + 1.
        let document_count = documents.len();
        let mut idf = vec![0.0; vocabulary.len()];
        for (token, &index) in &vocabulary {
            let df = document_frequency.get(token).copied().unwrap_or(0);
            idf[index] =
                ((document_count as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0;
        }

        debug!(
            vocabulary_size = vocabulary.len(),
            document_count, "TF-IDF vectorizer fitted"
        );

        Self {
            vocabulary,
            idf,
            document_count,
        }
    }

    /// Transform a document into its TF-IDF feature vector.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let tokens = tokenize(document);
        let mut features = vec![0.0; self.vocabulary.len()];

        for token in &tokens {
            if let Some(&index) = self.vocabulary.get(token) {
                features[index] += 1.0;
            }
        }

        // Normalize term counts by document length, then apply IDF.
        let length = tokens.len() as f64;
        if length > 0.0 {
            for (index, value) in features.iter_mut().enumerate() {
                *value = *value / length * self.idf[index];
            }
        }

        features
    }

    /// Length of the vectors produced by `transform`.
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn document_count(&self) -> usize {
        self.document_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_splits_on_non_alphanumeric() {
        assert_eq!(
            tokenize("Invoice: $2,000 due (March)!"),
            vec!["invoice", "2", "000", "due", "march"]
        );
    }

    #[test]
    fn tokenize_empty_text_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  --- !!! ").is_empty());
    }

    #[test]
    fn fit_assigns_first_seen_indices() {
        let vectorizer = TfidfVectorizer::fit(&["alpha beta", "beta gamma"]);
        assert_eq!(vectorizer.dimension(), 3);

        // "alpha" was seen first, so it owns index 0; a document containing
        // only "alpha" lights up exactly that slot.
        let features = vectorizer.transform("alpha");
        assert!(features[0] > 0.0);
        assert_eq!(features[1], 0.0);
        assert_eq!(features[2], 0.0);
    }

    #[test]
    fn rarer_tokens_weigh_more() {
        // "common" appears in every document, "rare" in one.
        let vectorizer =
            TfidfVectorizer::fit(&["common rare", "common filler", "common padding"]);
        let features = vectorizer.transform("common rare");

        let common_weight = features[0];
        let rare_weight = features[1];
        assert!(
            rare_weight > common_weight,
            "rare token ({rare_weight}) should outweigh common token ({common_weight})"
        );
    }

    #[test]
    fn out_of_vocabulary_tokens_are_ignored() {
        let vectorizer = TfidfVectorizer::fit(&["alpha beta"]);
        let features = vectorizer.transform("gamma delta epsilon");
        assert!(features.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn transform_is_deterministic() {
        let vectorizer = TfidfVectorizer::fit(&["pay the invoice", "file the report"]);
        let first = vectorizer.transform("invoice for the report");
        let second = vectorizer.transform("invoice for the report");
        assert_eq!(first, second);
    }

    #[test]
    fn vectorizer_round_trips_through_serde() {
        let vectorizer = TfidfVectorizer::fit(&["alpha beta", "beta gamma"]);
        let json = serde_json::to_string(&vectorizer).expect("serialize");
        let restored: TfidfVectorizer = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(
            vectorizer.transform("alpha beta gamma"),
            restored.transform("alpha beta gamma")
        );
    }
}
