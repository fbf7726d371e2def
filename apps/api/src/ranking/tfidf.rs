#![allow(dead_code)]

//! TF-IDF vector space over unigrams and bigrams.
//!
//! Fitted fresh for every corpus; nothing is cached between calls. Output is
//! fully deterministic: vocabulary selection and term ordering break ties on
//! the term string, never on hash order.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// English stop words, removed before bigrams are formed.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    include_str!("../../data/stop_words.txt")
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .collect()
});

/// Tokens are runs of two or more word characters.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VectorizeError {
    #[error("empty vocabulary; documents contain only stop words or no tokens")]
    EmptyVocabulary,
}

/// Lowercased unigrams and bigrams of `text`, stop words removed first.
pub fn analyze(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !STOP_WORDS.contains(t))
        .collect();

    let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    terms
}

/// Fitted document-term matrix. Rows are L2-normalised TF-IDF vectors in
/// corpus order; columns follow the alphabetically sorted vocabulary.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    terms: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    /// Fits the vocabulary and weights on `documents` and transforms them.
    /// At most `max_features` terms are kept, chosen by corpus frequency.
    pub fn fit_transform<S: AsRef<str>>(
        documents: &[S],
        max_features: usize,
    ) -> Result<Self, VectorizeError> {
        let doc_counts: Vec<BTreeMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut counts = BTreeMap::new();
                for term in analyze(doc.as_ref()) {
                    *counts.entry(term).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let mut corpus_freq: BTreeMap<&str, usize> = BTreeMap::new();
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for counts in &doc_counts {
            for (term, count) in counts {
                *corpus_freq.entry(term.as_str()).or_insert(0) += count;
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        if corpus_freq.is_empty() || max_features == 0 {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let mut by_frequency: Vec<(&str, usize)> = corpus_freq.into_iter().collect();
        by_frequency.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        by_frequency.truncate(max_features);

        let mut terms: Vec<String> = by_frequency.iter().map(|(t, _)| t.to_string()).collect();
        terms.sort();
        let index: HashMap<&str, usize> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1
        let n = documents.len() as f64;
        let idf: Vec<f64> = terms
            .iter()
            .map(|t| {
                let df = doc_freq.get(t.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows = doc_counts
            .iter()
            .map(|counts| {
                let mut row = vec![0.0; terms.len()];
                for (term, count) in counts {
                    if let Some(&col) = index.get(term.as_str()) {
                        row[col] = *count as f64 * idf[col];
                    }
                }
                l2_normalize(&mut row);
                row
            })
            .collect();

        Ok(Self { terms, rows })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn row(&self, doc: usize) -> &[f64] {
        &self.rows[doc]
    }

    /// Cosine similarity of two rows, in [0, 1]. A row with no kept terms
    /// has similarity 0 to everything.
    pub fn cosine(&self, a: usize, b: usize) -> f64 {
        let dot: f64 = self.rows[a]
            .iter()
            .zip(&self.rows[b])
            .map(|(x, y)| x * y)
            .sum();
        dot.clamp(0.0, 1.0)
    }

    /// The `n` highest-weighted terms of one row, weight > 0, descending.
    pub fn top_terms(&self, doc: usize, n: usize) -> Vec<(String, f64)> {
        let mut weighted: Vec<(&String, f64)> = self
            .terms
            .iter()
            .zip(&self.rows[doc])
            .filter(|(_, w)| **w > 0.0)
            .map(|(t, w)| (t, *w))
            .collect();
        weighted.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        weighted
            .into_iter()
            .take(n)
            .map(|(t, w)| (t.clone(), w))
            .collect()
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        row.iter_mut().for_each(|v| *v /= norm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_drops_stop_words_before_bigrams() {
        let terms = analyze("The Rust and the Python");
        assert_eq!(terms, ["rust", "python", "rust python"]);
    }

    #[test]
    fn test_analyze_ignores_single_char_tokens() {
        assert_eq!(analyze("C R Rust"), ["rust"]);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let m = TfidfMatrix::fit_transform(&["rust systems rust", "python data"], 1000).unwrap();
        for doc in 0..2 {
            let norm: f64 = m.row(doc).iter().map(|v| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_vocabulary_is_sorted_and_capped_by_frequency() {
        let m = TfidfMatrix::fit_transform(&["zig", "kafka", "kafka", "rust"], 2).unwrap();
        assert_eq!(m.terms(), ["kafka", "rust"]);
    }

    #[test]
    fn test_idf_is_smoothed() {
        // "rust" in both docs: idf = ln(3/3)+1 = 1; "zig" only in one: ln(3/2)+1.
        let m = TfidfMatrix::fit_transform(&["rust", "rust zig"], 1000).unwrap();
        let terms = m.terms();
        let zig = terms.iter().position(|t| t == "zig").unwrap();
        let rust = terms.iter().position(|t| t == "rust").unwrap();
        let row = m.row(1);
        let expected_ratio = (1.5_f64).ln() + 1.0;
        assert!((row[zig] / row[rust] - expected_ratio).abs() < 1e-9);
    }

    #[test]
    fn test_stop_word_corpus_is_empty_vocabulary() {
        let result = TfidfMatrix::fit_transform(&["the and of", "a an is"], 1000);
        assert_eq!(result.unwrap_err(), VectorizeError::EmptyVocabulary);
    }

    #[test]
    fn test_cosine_identical_and_disjoint() {
        let m = TfidfMatrix::fit_transform(&["rust tokio", "rust tokio", "painting"], 1000).unwrap();
        assert!((m.cosine(0, 1) - 1.0).abs() < 1e-9);
        assert_eq!(m.cosine(0, 2), 0.0);
    }

    #[test]
    fn test_top_terms_descending_and_positive() {
        let m = TfidfMatrix::fit_transform(&["rust rust rust tokio"], 1000).unwrap();
        let top = m.top_terms(0, 10);
        assert_eq!(top[0].0, "rust");
        assert!(top.iter().all(|(_, w)| *w > 0.0));
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
    }
}
