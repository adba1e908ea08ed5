use nalgebra::DMatrix;
use thiserror::Error;

/// Errors produced when a coordinate matrix fails structural validation.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ShapeError {
    #[error("conformation set is empty")]
    Empty,

    #[error("conformation row length {row_len} is not divisible by 3")]
    RowNotDivisibleBy3 { row_len: usize },

    #[error("conformations contain no points")]
    NoPoints,
}

/// An ordered, immutable collection of 3D point-set conformations.
///
/// Conformations are stored as the rows of one n×3m matrix: point `k` of a
/// conformation occupies columns `3k..3k+2` of its row. The matrix is
/// validated once at construction and never mutated afterwards, so it can be
/// shared freely across parallel pair evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct ConformationSet {
    coordinates: DMatrix<f64>,
}

impl ConformationSet {
    /// Validates and wraps a raw n×3m coordinate matrix.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if the matrix has no rows, a column count not
    /// divisible by 3, or zero columns (conformations without points).
    pub fn new(coordinates: DMatrix<f64>) -> Result<Self, ShapeError> {
        if coordinates.nrows() == 0 {
            return Err(ShapeError::Empty);
        }
        if coordinates.ncols() % 3 != 0 {
            return Err(ShapeError::RowNotDivisibleBy3 {
                row_len: coordinates.ncols(),
            });
        }
        if coordinates.ncols() == 0 {
            return Err(ShapeError::NoPoints);
        }
        Ok(Self { coordinates })
    }

    /// Number of conformations in the set.
    pub fn len(&self) -> usize {
        self.coordinates.nrows()
    }

    /// Returns `true` if the set holds no conformations.
    ///
    /// Construction rejects empty sets, so this is always `false` for a
    /// validated instance; it exists for API completeness.
    pub fn is_empty(&self) -> bool {
        self.coordinates.nrows() == 0
    }

    /// Number of 3D points per conformation.
    pub fn point_count(&self) -> usize {
        self.coordinates.ncols() / 3
    }

    /// Read-only view of the underlying n×3m coordinate matrix.
    pub fn coordinates(&self) -> &DMatrix<f64> {
        &self.coordinates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_matrix_is_accepted() {
        let set = ConformationSet::new(DMatrix::zeros(4, 6)).unwrap();
        assert_eq!(set.len(), 4);
        assert_eq!(set.point_count(), 2);
        assert!(!set.is_empty());
    }

    #[test]
    fn empty_set_is_rejected() {
        let result = ConformationSet::new(DMatrix::zeros(0, 6));
        assert_eq!(result.unwrap_err(), ShapeError::Empty);
    }

    #[test]
    fn row_length_not_divisible_by_three_is_rejected() {
        let result = ConformationSet::new(DMatrix::zeros(2, 7));
        assert_eq!(
            result.unwrap_err(),
            ShapeError::RowNotDivisibleBy3 { row_len: 7 }
        );
    }

    #[test]
    fn pointless_conformations_are_rejected() {
        let result = ConformationSet::new(DMatrix::zeros(3, 0));
        assert_eq!(result.unwrap_err(), ShapeError::NoPoints);
    }

    #[test]
    fn coordinates_view_matches_input() {
        let data = DMatrix::from_row_slice(1, 3, &[1.0, 2.0, 3.0]);
        let set = ConformationSet::new(data.clone()).unwrap();
        assert_eq!(set.coordinates(), &data);
    }
}
