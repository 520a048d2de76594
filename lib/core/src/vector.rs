use serde::{Deserialize, Serialize};

/// A sparse vector of (dimension, weight) pairs, sorted by dimension
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    /// Build from unsorted entries. Zero weights are dropped; duplicate
    /// dimensions are summed.
    #[must_use]
    pub fn new(mut entries: Vec<(usize, f32)>) -> Self {
        entries.sort_by_key(|&(dim, _)| dim);
        let mut merged: Vec<(usize, f32)> = Vec::with_capacity(entries.len());
        for (dim, weight) in entries {
            match merged.last_mut() {
                Some(last) if last.0 == dim => last.1 += weight,
                _ => merged.push((dim, weight)),
            }
        }
        merged.retain(|&(_, w)| w != 0.0);
        Self { entries: merged }
    }

    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    /// Weight at a dimension, zero when absent
    #[must_use]
    pub fn get(&self, dim: usize) -> f32 {
        self.entries
            .binary_search_by_key(&dim, |&(d, _)| d)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Dot product by merge-walking both sorted entry lists
    #[must_use]
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    #[inline]
    #[must_use]
    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Scale to unit length; the zero vector is left untouched
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > f32::EPSILON {
            let inv_norm = 1.0 / norm;
            for (_, w) in &mut self.entries {
                *w *= inv_norm;
            }
        }
    }

    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }

    /// Cosine similarity, 0.0 when either side has no norm
    #[must_use]
    pub fn cosine_similarity(&self, other: &SparseVector) -> f32 {
        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        let score = self.dot(other) / (norm_a * norm_b);
        if score.is_nan() {
            0.0
        } else {
            score
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_and_merges() {
        let v = SparseVector::new(vec![(3, 1.0), (1, 2.0), (3, 0.5), (2, 0.0)]);
        assert_eq!(v.entries(), &[(1, 2.0), (3, 1.5)]);
        assert_eq!(v.get(3), 1.5);
        assert_eq!(v.get(2), 0.0);
    }

    #[test]
    fn test_cosine_similarity() {
        let v1 = SparseVector::new(vec![(0, 1.0)]);
        let v2 = SparseVector::new(vec![(0, 3.0)]);
        assert!((v1.cosine_similarity(&v2) - 1.0).abs() < 1e-6);

        let v3 = SparseVector::new(vec![(0, 1.0)]);
        let v4 = SparseVector::new(vec![(1, 1.0)]);
        assert!((v3.cosine_similarity(&v4) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_similarity() {
        let zero = SparseVector::default();
        let v = SparseVector::new(vec![(0, 1.0)]);
        assert_eq!(zero.cosine_similarity(&v), 0.0);
        assert_eq!(v.cosine_similarity(&zero), 0.0);
        assert_eq!(zero.cosine_similarity(&zero), 0.0);
    }

    #[test]
    fn test_normalize() {
        let mut v = SparseVector::new(vec![(0, 3.0), (5, 4.0)]);
        v.normalize();
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert!((v.get(5) - 0.8).abs() < 1e-6);

        let mut zero = SparseVector::default();
        zero.normalize();
        assert!(zero.is_empty());
    }
}
