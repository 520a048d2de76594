//! TF-IDF vector space over catalog profiles
//!
//! Weights follow the usual smoothed formulation:
//!
//! ```text
//! idf(t)    = ln((1 + N) / (1 + df(t))) + 1
//! w(t, d)   = tf(t, d) * idf(t)
//! row(d)    = w(., d) / ||w(., d)||
//! ```
//!
//! The index is built once and never mutated afterwards. Queries are
//! projected onto the frozen vocabulary; unknown terms are dropped.

use crate::vector::SparseVector;
use ahash::AHashMap;
use tracing::{info, warn};

/// Term-weighted representation of a whole catalog
#[derive(Debug, Clone, Default)]
pub struct VectorSpaceIndex {
    // term -> dimension
    vocabulary: AHashMap<String, usize>,
    // dimension -> idf
    idf: Vec<f32>,
    // one L2-normalized row per document, in catalog order
    rows: Vec<SparseVector>,
}

fn term_counts<'a>(text: &'a str) -> AHashMap<&'a str, u32> {
    let mut counts: AHashMap<&str, u32> = AHashMap::new();
    for term in text.split_whitespace() {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

impl VectorSpaceIndex {
    /// Build the index from already-normalized profiles.
    ///
    /// When no profile has any term the result is the empty ("no signal")
    /// index: every query against it scores zero.
    pub fn build<S: AsRef<str>>(profiles: &[S]) -> Self {
        let counts: Vec<AHashMap<&str, u32>> =
            profiles.iter().map(|p| term_counts(p.as_ref())).collect();

        let mut doc_freq: AHashMap<&str, u32> = AHashMap::new();
        for doc in &counts {
            for &term in doc.keys() {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // Dimensions in sorted term order so the layout does not depend on
        // hash iteration order.
        let mut terms: Vec<&str> = doc_freq.keys().copied().collect();
        terms.sort_unstable();

        let n = profiles.len() as f32;
        let mut vocabulary = AHashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (dim, term) in terms.iter().enumerate() {
            let df = doc_freq[term] as f32;
            idf.push(((1.0 + n) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term.to_string(), dim);
        }

        let rows: Vec<SparseVector> = counts
            .iter()
            .map(|doc| {
                let entries = doc
                    .iter()
                    .map(|(term, &tf)| {
                        let dim = vocabulary[*term];
                        (dim, tf as f32 * idf[dim])
                    })
                    .collect();
                let mut row = SparseVector::new(entries);
                row.normalize();
                row
            })
            .collect();

        let index = Self { vocabulary, idf, rows };
        if index.is_empty() {
            warn!(
                documents = index.document_count(),
                "Catalog produced no indexable terms; every query will return no match"
            );
        } else {
            info!(
                documents = index.document_count(),
                vocabulary = index.vocabulary_size(),
                "Vector space index built"
            );
        }
        index
    }

    /// Project a normalized query into the index space.
    ///
    /// Uses the frozen IDF values; the vocabulary never grows here.
    pub fn project(&self, normalized_query: &str) -> SparseVector {
        let entries = term_counts(normalized_query)
            .into_iter()
            .filter_map(|(term, tf)| {
                self.vocabulary
                    .get(term)
                    .map(|&dim| (dim, tf as f32 * self.idf[dim]))
            })
            .collect();
        let mut query = SparseVector::new(entries);
        query.normalize();
        query
    }

    /// True in the "no signal" state: no terms were found in any profile
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    #[inline]
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn dimension_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    #[must_use]
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.dimension_of(term).map(|dim| self.idf[dim])
    }

    #[must_use]
    pub fn row(&self, doc: usize) -> Option<&SparseVector> {
        self.rows.get(doc)
    }

    pub fn rows(&self) -> impl Iterator<Item = &SparseVector> {
        self.rows.iter()
    }
}
