use nalgebra::DVector;
use thiserror::Error;

/// Errors produced when a per-point weight vector fails validation.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum WeightError {
    #[error("weight at index {index} is negative ({value})")]
    Negative { index: usize, value: f64 },

    #[error("total weight must be positive, got {total}")]
    NonPositiveTotal { total: f64 },
}

/// A per-point weight vector shared across all conformations.
///
/// Invariants enforced at construction: every entry is non-negative and the
/// total is strictly positive. The alignment kernel divides by the total, so
/// rejecting degenerate weightings here keeps the hot path free of checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    values: DVector<f64>,
    total: f64,
}

impl Weights {
    /// Validates and wraps a raw weight vector.
    ///
    /// # Errors
    ///
    /// Returns a [`WeightError`] if any entry is negative (NaN entries fail
    /// this check as well) or the sum of entries is not strictly positive.
    pub fn new(values: DVector<f64>) -> Result<Self, WeightError> {
        for (index, &value) in values.iter().enumerate() {
            if !(value >= 0.0) {
                return Err(WeightError::Negative { index, value });
            }
        }
        let total: f64 = values.sum();
        if !(total > 0.0) {
            return Err(WeightError::NonPositiveTotal { total });
        }
        Ok(Self { values, total })
    }

    /// Uniform all-ones weighting for `point_count` points.
    ///
    /// # Errors
    ///
    /// Returns [`WeightError::NonPositiveTotal`] when `point_count` is zero.
    pub fn uniform(point_count: usize) -> Result<Self, WeightError> {
        Self::new(DVector::from_element(point_count, 1.0))
    }

    /// Number of per-point weights.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the vector holds no weights.
    ///
    /// Always `false` for a validated instance (a zero-length vector has zero
    /// total and is rejected).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read-only view of the weight entries.
    pub fn values(&self) -> &DVector<f64> {
        &self.values
    }

    /// Precomputed sum of all entries; strictly positive.
    pub fn total(&self) -> f64 {
        self.total
    }
}
