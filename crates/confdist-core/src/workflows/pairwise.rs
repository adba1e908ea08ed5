use nalgebra::{DMatrix, DVector};
use tracing::{info, instrument};

use crate::engine::error::EngineError;
use crate::engine::matrix::DistanceMatrix;
use crate::engine::progress::{Progress, ProgressReporter};

/// Runs a complete pairwise distance-matrix computation.
///
/// Validates the raw inputs, assembles an engine honoring the worker-count
/// hint (0 means all available cores), and fills the matrix. The returned
/// engine exposes read-only views of both the coordinates and the computed
/// distances.
///
/// # Errors
///
/// Returns an [`EngineError`] when the inputs fail boundary validation or
/// the worker pool cannot be built; the compute pass itself cannot fail.
#[instrument(skip_all, name = "pairwise_workflow")]
pub fn run(
    coordinates: DMatrix<f64>,
    weights: Option<DVector<f64>>,
    workers: usize,
    reporter: &ProgressReporter,
) -> Result<DistanceMatrix, EngineError> {
    reporter.report(Progress::Message("Validating input matrices".to_string()));
    info!(
        conformations = coordinates.nrows(),
        row_length = coordinates.ncols(),
        "Starting pairwise distance workflow."
    );

    let mut builder = DistanceMatrix::builder()
        .coordinates(coordinates)
        .workers(workers);
    if let Some(weights) = weights {
        builder = builder.weights(weights);
    }
    let mut engine = builder.build()?;

    engine.compute_with_progress(reporter);

    info!(
        pairs = engine.pair_count(),
        "Pairwise distance workflow complete."
    );
    Ok(engine)
}
