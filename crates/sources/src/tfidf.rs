//! TF-IDF vector space over movie documents.
//!
//! ## Weighting
//! - text is lowercased, tokens are runs of at least two word characters
//! - English stop words are dropped before n-grams are formed
//! - term frequency is the raw count within a document
//! - idf = ln((1 + n) / (1 + df)) + 1, where n is the number of documents
//! - every row is L2-normalised (all-zero rows stay zero)
//!
//! When more distinct terms exist than `max_features`, only the terms with
//! the highest corpus-wide count survive; ties go to the alphabetically
//! smaller term. The surviving vocabulary is indexed alphabetically.

use crate::stop_words::is_stop_word;
use crate::ScoreVector;
use ndarray::Array1;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 5000;

// =============================================================================
// Sparse rows
// =============================================================================

/// A sparse row of (term index, weight) pairs, sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from unsorted entries. Duplicate indices are summed.
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|&(index, _)| index);
        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (index, value) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == index => *acc += value,
                _ => merged.push((index, value)),
            }
        }
        Self { entries: merged }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    /// Dot product with another sparse row (merge walk over both index lists)
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_val) = self.entries[i];
            let (b_idx, b_val) = other.entries[j];
            if a_idx == b_idx {
                sum += a_val * b_val;
                i += 1;
                j += 1;
            } else if a_idx < b_idx {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }

    /// Dot product with a dense vector of vocabulary length
    pub fn dot_dense(&self, dense: &Array1<f64>) -> f64 {
        self.entries.iter().map(|&(idx, v)| v * dense[idx]).sum()
    }

    /// `dense += scale * self`
    pub fn add_scaled_to(&self, dense: &mut Array1<f64>, scale: f64) {
        for &(idx, v) in &self.entries {
            dense[idx] += scale * v;
        }
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, v) in &mut self.entries {
                *v /= norm;
            }
        }
    }
}

/// Cosine similarity of two sparse rows; 0 when either has zero norm
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 { 0.0 } else { a.dot(b) / denom }
}

// =============================================================================
// Vectorizer
// =============================================================================

/// Configurable TF-IDF vectorizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TfidfVectorizer {
    max_features: usize,
    ngram_range: (usize, usize),
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    /// Unigrams, English stop words, 5000 features
    pub fn new() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            ngram_range: (1, 1),
        }
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Inclusive (min, max) n-gram lengths. A minimum of 0 is treated as 1.
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        let min_n = min_n.max(1);
        self.ngram_range = (min_n, max_n.max(min_n));
        self
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    /// Terms extracted from one document, in document order
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens: Vec<String> = tokenize(text)
            .into_iter()
            .filter(|t| !is_stop_word(t))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        if max_n == 1 {
            return tokens;
        }

        let mut terms = Vec::new();
        let mut start = min_n;
        if min_n == 1 {
            terms.extend(tokens.iter().cloned());
            start = 2;
        }
        for n in start..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    /// Learn the vocabulary and idf from `documents` and weight every one of them
    pub fn fit_transform(&self, documents: &[String]) -> TextSpace {
        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf = HashMap::new();
                for term in self.analyze(doc) {
                    *tf.entry(term).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        // corpus count and document frequency per term
        let mut stats: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for tf in &counts {
            for (term, &count) in tf {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += count;
                entry.1 += 1;
            }
        }

        let mut kept: Vec<(&str, usize, usize)> =
            stats.into_iter().map(|(t, (c, df))| (t, c, df)).collect();
        if kept.len() > self.max_features {
            kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            kept.truncate(self.max_features);
            kept.sort_by(|a, b| a.0.cmp(b.0));
        }

        let n_docs = documents.len() as f64;
        let vocabulary: Vec<String> = kept.iter().map(|(t, _, _)| t.to_string()).collect();
        let index: HashMap<&str, usize> = kept
            .iter()
            .enumerate()
            .map(|(i, (t, _, _))| (*t, i))
            .collect();
        let idf: Vec<f64> = kept
            .iter()
            .map(|&(_, _, df)| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .iter()
            .map(|tf| {
                let entries = tf
                    .iter()
                    .filter_map(|(term, &count)| {
                        index
                            .get(term.as_str())
                            .map(|&i| (i, count as f64 * idf[i]))
                    })
                    .collect();
                let mut row = SparseVector::from_entries(entries);
                row.normalize();
                row
            })
            .collect();

        debug!(
            "Fitted TF-IDF space: {} documents, {} terms",
            documents.len(),
            vocabulary.len()
        );

        TextSpace { vocabulary, rows }
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_owned)
        .collect()
}

// =============================================================================
// Fitted space
// =============================================================================

/// Weighted rows for a fitted corpus, one per input document
#[derive(Debug, Clone, Default)]
pub struct TextSpace {
    vocabulary: Vec<String>,
    rows: Vec<SparseVector>,
}

impl TextSpace {
    /// Terms in index order
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn row(&self, i: usize) -> Option<&SparseVector> {
        self.rows.get(i)
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cosine similarity of every row against a dense vector of vocabulary length
    pub fn similarities_to_dense(&self, dense: &Array1<f64>) -> ScoreVector {
        let dense_norm = dense.dot(dense).sqrt();
        self.rows
            .iter()
            .map(|row| {
                let denom = row.norm() * dense_norm;
                if denom == 0.0 { 0.0 } else { row.dot_dense(dense) / denom }
            })
            .collect()
    }

    /// Cosine similarity of the first `count` rows against `query`
    pub fn similarities_to_row(&self, query: &SparseVector, count: usize) -> ScoreVector {
        self.rows
            .iter()
            .take(count)
            .map(|row| cosine_similarity(row, query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_analyze_drops_stop_words_and_short_tokens() {
        let v = TfidfVectorizer::new();
        assert_eq!(v.analyze("The Robot and a X-Wing!"), vec!["robot", "wing"]);
    }

    #[test]
    fn test_analyze_bigrams_skip_stop_words() {
        let v = TfidfVectorizer::new().with_ngram_range(1, 2);
        assert_eq!(
            v.analyze("Space of Pirates"),
            vec!["space", "pirates", "space pirates"]
        );
    }

    #[test]
    fn test_vocabulary_is_alphabetical() {
        let space = TfidfVectorizer::new().fit_transform(&docs(&["zebra apple", "mango"]));
        assert_eq!(space.vocabulary(), &["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let space = TfidfVectorizer::new()
            .with_max_features(2)
            .fit_transform(&docs(&["robot robot heist", "robot space", "space"]));
        assert_eq!(space.vocabulary(), &["robot", "space"]);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let space = TfidfVectorizer::new().fit_transform(&docs(&[
            "robot heist city",
            "robot romance",
            "the and of",
        ]));
        assert!((space.row(0).unwrap().norm() - 1.0).abs() < 1e-12);
        assert!((space.row(1).unwrap().norm() - 1.0).abs() < 1e-12);
        assert!(space.row(2).unwrap().is_empty());
    }

    #[test]
    fn test_identical_documents_have_cosine_one() {
        let space = TfidfVectorizer::new().fit_transform(&docs(&[
            "galaxy pirates",
            "galaxy pirates",
            "cooking show",
        ]));
        let sim = cosine_similarity(space.row(0).unwrap(), space.row(1).unwrap());
        assert!((sim - 1.0).abs() < 1e-12);
        let other = cosine_similarity(space.row(0).unwrap(), space.row(2).unwrap());
        assert_eq!(other, 0.0);
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let space = TfidfVectorizer::new().fit_transform(&docs(&[
            "robot dragon",
            "robot",
            "robot",
        ]));
        let row = space.row(0).unwrap();
        let dragon = space.vocabulary().iter().position(|t| t == "dragon").unwrap();
        let robot = space.vocabulary().iter().position(|t| t == "robot").unwrap();
        let weight = |i| row.entries().iter().find(|(idx, _)| *idx == i).unwrap().1;
        assert!(weight(dragon) > weight(robot));
    }

    #[test]
    fn test_empty_vocabulary_gives_zero_similarities() {
        let space = TfidfVectorizer::new().fit_transform(&docs(&["the of", "and a"]));
        assert_eq!(space.vocabulary_len(), 0);
        let profile = Array1::zeros(0);
        assert_eq!(space.similarities_to_dense(&profile).to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_sparse_dense_helpers() {
        let row = SparseVector::from_entries(vec![(2, 1.0), (0, 2.0), (2, 1.0)]);
        assert_eq!(row.entries(), &[(0, 2.0), (2, 2.0)]);

        let mut dense = Array1::zeros(3);
        row.add_scaled_to(&mut dense, 0.5);
        assert_eq!(dense.to_vec(), vec![1.0, 0.0, 1.0]);
        assert_eq!(row.dot_dense(&dense), 4.0);
    }
}
