//! TF-IDF term vector space.
//!
//! Fits a bounded vocabulary over a set of documents and represents each
//! document as an L2-normalized sparse vector over it. Weighting is the raw
//! term count times the smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1`.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::tokenizer::tokenize;

/// Sparse vector as `(column, weight)` pairs sorted by column
pub type SparseVector = Vec<(usize, f64)>;

/// Fitted vocabulary plus one weighted vector per document
#[derive(Debug, Clone, PartialEq)]
pub struct TermVectorSpace {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
}

#[derive(Default)]
struct TermStats {
    doc_freq: usize,
    total: usize,
}

impl TermVectorSpace {
    /// Fits the vocabulary and vectorizes every document
    ///
    /// At most `max_features` terms are kept, ranked by document frequency,
    /// then by total occurrences, then alphabetically. Kept terms get columns
    /// in alphabetical order.
    pub fn fit<S: AsRef<str>>(documents: &[S], max_features: usize) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        let mut stats: HashMap<&str, TermStats> = HashMap::new();
        for tokens in &tokenized {
            let mut seen = HashSet::new();
            for token in tokens {
                let entry = stats.entry(token.as_str()).or_default();
                entry.total += 1;
                if seen.insert(token.as_str()) {
                    entry.doc_freq += 1;
                }
            }
        }

        let mut ranked: Vec<(&str, &TermStats)> = stats.iter().map(|(t, s)| (*t, s)).collect();
        ranked.sort_by(|a, b| {
            b.1.doc_freq
                .cmp(&a.1.doc_freq)
                .then(b.1.total.cmp(&a.1.total))
                .then(a.0.cmp(b.0))
        });
        ranked.truncate(max_features);

        let mut kept: Vec<(&str, usize)> = ranked.iter().map(|(t, s)| (*t, s.doc_freq)).collect();
        kept.sort_by(|a, b| a.0.cmp(b.0));

        let n = documents.len() as f64;
        let vocabulary: BTreeMap<String, usize> = kept
            .iter()
            .enumerate()
            .map(|(col, (term, _))| (term.to_string(), col))
            .collect();
        let idf: Vec<f64> = kept
            .iter()
            .map(|(_, df)| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let mut space = Self {
            vocabulary,
            idf,
            vectors: Vec::new(),
        };
        let vectors = tokenized.iter().map(|tokens| space.weigh(tokens)).collect();
        space.vectors = vectors;

        tracing::debug!(
            documents = documents.len(),
            distinct_terms = stats.len(),
            vocabulary = space.vocabulary.len(),
            "Fitted term vector space"
        );

        space
    }

    /// Vectorizes already tokenized text against the fitted vocabulary
    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(&col) = self.vocabulary.get(token) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(col, count)| (col, count * self.idf[col]))
            .collect();

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in vector.iter_mut() {
                *w /= norm;
            }
        }
        vector
    }

    /// Vectorizes arbitrary text with the fitted vocabulary
    #[cfg(test)]
    fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&tokenize(text))
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    #[cfg(test)]
    fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Rows whose tags produced no in-vocabulary term
    pub fn degenerate_rows(&self) -> Vec<usize> {
        self.vectors
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_empty())
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::*;

    /// Dot product of two column-sorted sparse vectors
    fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
        let (mut i, mut j, mut sum) = (0, 0, 0.0);
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    #[test]
    fn test_vocabulary_is_alphabetical() {
        let space = TermVectorSpace::fit(&["space war robot", "romance drama"], 5000);
        assert_eq!(space.vocabulary_len(), 5);
        assert_eq!(space.column("drama"), Some(0));
        assert_eq!(space.column("war"), Some(4));
        assert_eq!(space.column("the"), None);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let docs = ["alien ship", "alien war", "alien ship crew", "lonely"];
        let space = TermVectorSpace::fit(&docs, 2);

        assert_eq!(space.vocabulary_len(), 2);
        assert!(space.column("alien").is_some());
        assert!(space.column("ship").is_some());
        assert!(space.column("lonely").is_none());
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let space = TermVectorSpace::fit(&["space war war robot", "space drama"], 5000);
        for vector in space.vectors() {
            let norm = sparse_dot(vector, vector);
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rarer_terms_weigh_more() {
        let space = TermVectorSpace::fit(&["space robot", "space drama", "space war"], 5000);
        let first = &space.vectors()[0];
        let space_col = space.column("space").unwrap();
        let robot_col = space.column("robot").unwrap();

        let weight = |col| first.iter().find(|(c, _)| *c == col).map(|(_, w)| *w).unwrap();
        assert!(weight(robot_col) > weight(space_col));
    }

    #[test]
    fn test_degenerate_rows() {
        let space = TermVectorSpace::fit(&["space war", "the and of", "x"], 5000);
        assert_eq!(space.degenerate_rows(), vec![1, 2]);
    }

    #[test]
    fn test_transform_matches_fit() {
        let space = TermVectorSpace::fit(&["space war robot", "romance drama"], 5000);
        assert_eq!(space.transform("space war robot"), space.vectors()[0]);
        assert!(space.transform("unknown words only").is_empty());
    }

    #[test]
    fn test_sparse_dot_disjoint() {
        assert_eq!(sparse_dot(&[(0, 1.0)], &[(1, 1.0)]), 0.0);
        assert_eq!(sparse_dot(&[(0, 0.5), (2, 0.5)], &[(2, 2.0)]), 1.0);
    }
}
