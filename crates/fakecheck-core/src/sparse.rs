//! Sparse feature vectors

use serde::Serialize;

use crate::error::{PipelineError, Result};

/// Fixed-dimension sparse vector with sorted, unique indices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparseVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// All-zero vector
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    /// Build from `(index, value)` pairs in any order.
    ///
    /// Duplicate indices are summed and explicit zeros dropped. An index
    /// outside `0..dim` is rejected.
    pub fn from_pairs(dim: usize, pairs: impl IntoIterator<Item = (usize, f64)>) -> Result<Self> {
        let mut entries: Vec<(usize, f64)> = pairs.into_iter().collect();
        if let Some(&(idx, _)) = entries.iter().find(|(idx, _)| *idx >= dim) {
            return Err(PipelineError::DimensionMismatch {
                model: "sparse vector".to_string(),
                expected: dim,
                actual: idx + 1,
            });
        }

        entries.sort_by_key(|(idx, _)| *idx);
        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (idx, value) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == idx => *acc += value,
                _ => merged.push((idx, value)),
            }
        }
        merged.retain(|(_, value)| *value != 0.0);

        Ok(Self {
            dim,
            entries: merged,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored non-zero entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value at `idx` (zero when not stored)
    pub fn get(&self, idx: usize) -> f64 {
        self.entries
            .binary_search_by_key(&idx, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Dot product with a dense vector of the same dimension
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|(idx, value)| value * dense.get(*idx).copied().unwrap_or(0.0))
            .sum()
    }

    pub fn l1_norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v.abs()).sum()
    }

    pub fn l2_norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    /// Divide every entry by `divisor`; a zero divisor leaves the vector as is
    pub(crate) fn scale_down(&mut self, divisor: f64) {
        if divisor > 0.0 {
            for (_, value) in &mut self.entries {
                *value /= divisor;
            }
        }
    }

    /// Dense copy, mostly useful for debugging and tests
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dim];
        for (idx, value) in &self.entries {
            dense[*idx] = *value;
        }
        dense
    }
}
