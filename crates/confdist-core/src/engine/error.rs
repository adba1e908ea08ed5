use thiserror::Error;

use crate::core::models::conformation::ShapeError;
use crate::core::models::weights::WeightError;

/// Errors raised while constructing a distance-matrix engine.
///
/// All validation happens at this boundary; once an engine is built, the
/// compute pass itself has no recoverable error conditions.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid conformation matrix: {source}")]
    Shape {
        #[from]
        source: ShapeError,
    },

    #[error("Invalid weight vector: {source}")]
    Weights {
        #[from]
        source: WeightError,
    },

    #[error("Weight vector has {actual} entries but conformations have {expected} points")]
    WeightCountMismatch { expected: usize, actual: usize },

    #[cfg(feature = "parallel")]
    #[error("Failed to build worker pool: {source}")]
    WorkerPool {
        #[from]
        source: rayon::ThreadPoolBuildError,
    },
}
