use nalgebra::{DMatrix, DVector};
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(not(feature = "parallel"))]
use tracing::warn;

use crate::core::alignment;
use crate::core::models::conformation::ConformationSet;
use crate::core::models::weights::Weights;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::schedule;

/// Pairwise weighted-RMSD distance matrix over a set of conformations.
///
/// The engine owns the immutable inputs (an n×3m coordinate matrix and an
/// m-entry weight vector) and the n×n output matrix. The output starts
/// zero-filled and is rewritten in full by every [`compute`](Self::compute)
/// pass; between passes the accessors expose consistent, fully-written data
/// only (a pass is atomic from the caller's point of view).
pub struct DistanceMatrix {
    conformations: ConformationSet,
    weights: Weights,
    distances: DMatrix<f64>,
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl std::fmt::Debug for DistanceMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistanceMatrix")
            .field("conformations", &self.conformations)
            .field("weights", &self.weights)
            .field("distances", &self.distances)
            .finish_non_exhaustive()
    }
}

/// Builder for [`DistanceMatrix`]; performs all boundary validation.
#[derive(Debug, Default)]
pub struct DistanceMatrixBuilder {
    coordinates: Option<DMatrix<f64>>,
    weights: Option<DVector<f64>>,
    workers: usize,
}

impl DistanceMatrixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The n×3m coordinate matrix, one conformation per row. Required.
    pub fn coordinates(mut self, coordinates: DMatrix<f64>) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Per-point weights. Defaults to all-ones when not supplied.
    pub fn weights(mut self, weights: DVector<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Worker-count hint for the compute pass; 0 means use all available
    /// cores. Ignored when the crate is built without the `parallel` feature.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Validates the inputs and assembles the engine.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] when the coordinate matrix is missing or
    /// malformed, the weight vector is degenerate or of the wrong length, or
    /// the requested worker pool cannot be built.
    pub fn build(self) -> Result<DistanceMatrix, EngineError> {
        let coordinates = self
            .coordinates
            .ok_or(EngineError::MissingParameter("coordinates"))?;
        let conformations = ConformationSet::new(coordinates)?;

        let weights = match self.weights {
            Some(values) => {
                if values.len() != conformations.point_count() {
                    return Err(EngineError::WeightCountMismatch {
                        expected: conformations.point_count(),
                        actual: values.len(),
                    });
                }
                Weights::new(values)?
            }
            None => Weights::uniform(conformations.point_count())?,
        };

        #[cfg(not(feature = "parallel"))]
        if self.workers > 1 {
            warn!(
                workers = self.workers,
                "Built without the 'parallel' feature; worker-count hint ignored."
            );
        }

        let n = conformations.len();
        debug!(
            conformations = n,
            points = conformations.point_count(),
            workers = self.workers,
            "Distance matrix engine constructed."
        );

        Ok(DistanceMatrix {
            distances: DMatrix::zeros(n, n),
            #[cfg(feature = "parallel")]
            pool: build_pool(self.workers)?,
            conformations,
            weights,
        })
    }
}

#[cfg(feature = "parallel")]
fn build_pool(workers: usize) -> Result<Option<rayon::ThreadPool>, EngineError> {
    if workers == 0 {
        // rayon's shared pool, sized to the machine.
        return Ok(None);
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;
    Ok(Some(pool))
}

impl DistanceMatrix {
    pub fn builder() -> DistanceMatrixBuilder {
        DistanceMatrixBuilder::new()
    }

    /// Number of conformations (the matrix dimension n).
    pub fn conformation_count(&self) -> usize {
        self.conformations.len()
    }

    /// Number of 3D points per conformation.
    pub fn point_count(&self) -> usize {
        self.conformations.point_count()
    }

    /// Number of unordered pairs a compute pass evaluates.
    pub fn pair_count(&self) -> u64 {
        let n = self.conformations.len() as u64;
        n * (n - 1) / 2
    }

    /// Read-only view of the n×3m coordinate matrix as supplied.
    pub fn coordinates(&self) -> &DMatrix<f64> {
        self.conformations.coordinates()
    }

    /// Read-only view of the per-point weights.
    pub fn weights(&self) -> &DVector<f64> {
        self.weights.values()
    }

    /// Read-only view of the n×n distance matrix.
    ///
    /// Zero-filled until the first [`compute`](Self::compute) pass finishes.
    pub fn distances(&self) -> &DMatrix<f64> {
        &self.distances
    }

    /// Fills the distance matrix from the stored conformations and weights.
    ///
    /// Idempotent: the inputs are immutable, so repeated passes produce
    /// identical output.
    pub fn compute(&mut self) {
        self.compute_with_progress(&ProgressReporter::default());
    }

    /// Like [`compute`](Self::compute), reporting progress events along the
    /// way. The callback may be invoked concurrently from worker threads.
    #[instrument(
        skip_all,
        name = "distance_matrix_compute",
        fields(
            conformations = self.conformations.len(),
            points = self.conformations.point_count()
        )
    )]
    pub fn compute_with_progress(&mut self, reporter: &ProgressReporter) {
        reporter.report(Progress::ComputeStart {
            conformations: self.conformations.len(),
            pairs: self.pair_count(),
        });

        self.distances = self.fill(reporter);

        reporter.report(Progress::ComputeFinish);
        info!(
            conformations = self.conformations.len(),
            pairs = self.pair_count(),
            "Distance matrix filled."
        );
    }

    #[cfg(feature = "parallel")]
    fn fill(&self, reporter: &ProgressReporter) -> DMatrix<f64> {
        match &self.pool {
            Some(pool) => pool.install(|| self.fill_balanced(reporter)),
            None => self.fill_balanced(reporter),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn fill(&self, reporter: &ProgressReporter) -> DMatrix<f64> {
        self.fill_triangular(reporter)
    }

    /// Balanced fork-join fill: one task per row index, each owning the same
    /// number of pair evaluations. Tasks only read shared immutable inputs;
    /// the disjoint cells they produce are committed after the join.
    #[cfg(feature = "parallel")]
    fn fill_balanced(&self, reporter: &ProgressReporter) -> DMatrix<f64> {
        let n = self.conformations.len();
        let coords = self.conformations.coordinates();
        let weights = self.weights.values();

        let mut cells: Vec<(usize, usize, f64)> = (0..n)
            .into_par_iter()
            .flat_map_iter(|row| {
                schedule::folded_row_pairs(n, row).map(move |(i, j)| {
                    let distance =
                        alignment::weighted_rmsd(&coords.row(i), &coords.row(j), weights);
                    reporter.report(Progress::PairDone);
                    (i, j, distance)
                })
            })
            .collect();

        // The folded schedule skips the antipodal pairs when n is even.
        if n % 2 == 0 {
            let antipodal: Vec<(usize, usize)> = schedule::antipodal_pairs(n).collect();
            cells.par_extend(antipodal.into_par_iter().map(|(i, j)| {
                let distance = alignment::weighted_rmsd(&coords.row(i), &coords.row(j), weights);
                reporter.report(Progress::PairDone);
                (i, j, distance)
            }));
        }

        let mut distances = DMatrix::zeros(n, n);
        for (i, j, distance) in cells {
            distances[(i, j)] = distance;
            distances[(j, i)] = distance;
        }
        distances
    }

    /// Sequential triangular fill; visits the same pairs with the same
    /// formula as the balanced schedule, so the output is identical.
    #[cfg(not(feature = "parallel"))]
    fn fill_triangular(&self, reporter: &ProgressReporter) -> DMatrix<f64> {
        let n = self.conformations.len();
        let coords = self.conformations.coordinates();
        let weights = self.weights.values();

        let mut distances = DMatrix::zeros(n, n);
        for (i, j) in schedule::triangular_pairs(n) {
            let distance = alignment::weighted_rmsd(&coords.row(i), &coords.row(j), weights);
            distances[(i, j)] = distance;
            distances[(j, i)] = distance;
            reporter.report(Progress::PairDone);
        }
        distances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::conformation::ShapeError;
    use crate::core::models::weights::WeightError;
    use nalgebra::{Rotation3, Vector3};
    use std::sync::atomic::{AtomicU64, Ordering};

    const TOLERANCE: f64 = 1e-8;

    /// Two points on the x axis, transformed per conformation.
    fn rigid_copies(transforms: &[(Rotation3<f64>, Vector3<f64>)]) -> DMatrix<f64> {
        let base = [Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)];
        let rows: Vec<f64> = transforms
            .iter()
            .flat_map(|(rotation, translation)| {
                base.iter().flat_map(move |p| {
                    let q = rotation * p + translation;
                    [q.x, q.y, q.z]
                })
            })
            .collect();
        DMatrix::from_row_slice(transforms.len(), 6, &rows)
    }

    /// n conformations of m points with distinct, non-congruent geometry.
    fn scattered(n: usize, m: usize) -> DMatrix<f64> {
        let mut data = Vec::with_capacity(n * 3 * m);
        for i in 0..n {
            for k in 0..m {
                let s = (i + 1) as f64;
                let t = (k + 1) as f64;
                data.push(s * t);
                data.push(s + t * t);
                data.push((s * 0.5 - t).sin());
            }
        }
        DMatrix::from_row_slice(n, 3 * m, &data)
    }

    fn assert_valid_distance_matrix(d: &DMatrix<f64>) {
        let n = d.nrows();
        assert_eq!(d.ncols(), n);
        for i in 0..n {
            assert_eq!(d[(i, i)], 0.0, "nonzero diagonal at {}", i);
            for j in 0..n {
                assert!(d[(i, j)] >= 0.0, "negative entry at ({}, {})", i, j);
                assert_eq!(d[(i, j)], d[(j, i)], "asymmetry at ({}, {})", i, j);
            }
        }
    }

    #[test]
    fn rotated_copy_is_at_zero_distance_and_unrelated_pairs_are_not() {
        let quarter_turn =
            Rotation3::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2);
        let mut coords = rigid_copies(&[
            (Rotation3::identity(), Vector3::zeros()),
            (Rotation3::identity(), Vector3::new(0.0, 3.0, 0.0)),
            (quarter_turn, Vector3::new(1.0, 2.0, 3.0)),
            (Rotation3::identity(), Vector3::new(5.0, 0.0, 1.0)),
        ]);
        // Stretch conformations 1 and 3 so they are genuinely different shapes.
        coords[(1, 3)] = 4.0;
        coords[(3, 3)] = 2.5;

        let mut engine = DistanceMatrix::builder()
            .coordinates(coords)
            .weights(DVector::from_row_slice(&[1.0, 1.0]))
            .build()
            .unwrap();
        engine.compute();
        let d = engine.distances();

        assert_valid_distance_matrix(d);
        assert!(d[(0, 2)].abs() < TOLERANCE, "rigid copy: {}", d[(0, 2)]);
        assert!(d[(0, 1)] > TOLERANCE);
        assert!(d[(0, 3)] > TOLERANCE);
        assert_eq!(d[(0, 1)], d[(1, 0)]);
        assert_eq!(d[(0, 3)], d[(3, 0)]);
    }

    #[test]
    fn odd_and_even_sizes_fill_every_cell() {
        for n in [5usize, 6] {
            let mut engine = DistanceMatrix::builder()
                .coordinates(scattered(n, 3))
                .build()
                .unwrap();
            engine.compute();
            let d = engine.distances();

            assert_valid_distance_matrix(d);
            for i in 0..n {
                for j in 0..n {
                    if i != j {
                        assert!(
                            d[(i, j)] > 0.0,
                            "unfilled or zero cell ({}, {}) for n = {}",
                            i,
                            j,
                            n
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn distances_start_zero_filled_before_the_first_pass() {
        let engine = DistanceMatrix::builder()
            .coordinates(scattered(4, 2))
            .build()
            .unwrap();
        assert_eq!(engine.distances(), &DMatrix::zeros(4, 4));
        assert_eq!(engine.pair_count(), 6);
    }

    #[test]
    fn repeated_passes_are_idempotent() {
        let mut engine = DistanceMatrix::builder()
            .coordinates(scattered(7, 2))
            .build()
            .unwrap();
        engine.compute();
        let first = engine.distances().clone();
        engine.compute();
        assert_eq!(&first, engine.distances());
    }

    #[test]
    fn engine_output_matches_a_direct_triangular_evaluation() {
        let coords = scattered(6, 3);
        let weights = DVector::from_row_slice(&[1.0, 2.0, 0.5]);

        let mut engine = DistanceMatrix::builder()
            .coordinates(coords.clone())
            .weights(weights.clone())
            .build()
            .unwrap();
        engine.compute();

        let n = coords.nrows();
        let mut expected = DMatrix::zeros(n, n);
        for (i, j) in schedule::triangular_pairs(n) {
            let d = alignment::weighted_rmsd(&coords.row(i), &coords.row(j), &weights);
            expected[(i, j)] = d;
            expected[(j, i)] = d;
        }

        assert_eq!(engine.distances(), &expected);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn worker_count_does_not_change_the_result() {
        let coords = scattered(9, 2);
        let mut single = DistanceMatrix::builder()
            .coordinates(coords.clone())
            .workers(1)
            .build()
            .unwrap();
        let mut several = DistanceMatrix::builder()
            .coordinates(coords)
            .workers(4)
            .build()
            .unwrap();
        single.compute();
        several.compute();
        assert_eq!(single.distances(), several.distances());
    }

    #[test]
    fn progress_events_cover_every_pair() {
        let starts = AtomicU64::new(0);
        let pairs_announced = AtomicU64::new(0);
        let pairs_done = AtomicU64::new(0);
        let finishes = AtomicU64::new(0);

        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::ComputeStart { pairs, .. } => {
                starts.fetch_add(1, Ordering::SeqCst);
                pairs_announced.store(pairs, Ordering::SeqCst);
            }
            Progress::PairDone => {
                pairs_done.fetch_add(1, Ordering::SeqCst);
            }
            Progress::ComputeFinish => {
                finishes.fetch_add(1, Ordering::SeqCst);
            }
            Progress::Message(_) => {}
        }));

        let mut engine = DistanceMatrix::builder()
            .coordinates(scattered(6, 2))
            .build()
            .unwrap();
        engine.compute_with_progress(&reporter);

        assert_eq!(starts.load(Ordering::SeqCst), 1);
        assert_eq!(finishes.load(Ordering::SeqCst), 1);
        assert_eq!(pairs_announced.load(Ordering::SeqCst), 15);
        assert_eq!(pairs_done.load(Ordering::SeqCst), 15);
    }

    #[test]
    fn missing_coordinates_are_rejected() {
        let result = DistanceMatrix::builder().build();
        assert!(matches!(
            result.unwrap_err(),
            EngineError::MissingParameter("coordinates")
        ));
    }

    #[test]
    fn malformed_row_length_is_rejected() {
        let result = DistanceMatrix::builder()
            .coordinates(DMatrix::zeros(3, 7))
            .build();
        assert!(matches!(
            result.unwrap_err(),
            EngineError::Shape {
                source: ShapeError::RowNotDivisibleBy3 { row_len: 7 }
            }
        ));
    }

    #[test]
    fn weight_count_mismatch_is_rejected() {
        let result = DistanceMatrix::builder()
            .coordinates(scattered(3, 2))
            .weights(DVector::from_row_slice(&[1.0, 1.0, 1.0]))
            .build();
        assert!(matches!(
            result.unwrap_err(),
            EngineError::WeightCountMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn degenerate_weights_are_rejected() {
        let zero_total = DistanceMatrix::builder()
            .coordinates(scattered(3, 2))
            .weights(DVector::from_row_slice(&[0.0, 0.0]))
            .build();
        assert!(matches!(
            zero_total.unwrap_err(),
            EngineError::Weights {
                source: WeightError::NonPositiveTotal { .. }
            }
        ));

        let negative = DistanceMatrix::builder()
            .coordinates(scattered(3, 2))
            .weights(DVector::from_row_slice(&[1.0, -1.0]))
            .build();
        assert!(matches!(
            negative.unwrap_err(),
            EngineError::Weights {
                source: WeightError::Negative { index: 1, .. }
            }
        ));
    }

    #[test]
    fn default_weights_are_uniform() {
        let coords = scattered(4, 3);
        let mut implicit = DistanceMatrix::builder()
            .coordinates(coords.clone())
            .build()
            .unwrap();
        let mut explicit = DistanceMatrix::builder()
            .coordinates(coords)
            .weights(DVector::from_element(3, 1.0))
            .build()
            .unwrap();
        implicit.compute();
        explicit.compute();
        assert_eq!(implicit.distances(), explicit.distances());
    }

    #[test]
    fn single_conformation_yields_a_one_by_one_zero_matrix() {
        let mut engine = DistanceMatrix::builder()
            .coordinates(scattered(1, 2))
            .build()
            .unwrap();
        engine.compute();
        assert_eq!(engine.distances(), &DMatrix::zeros(1, 1));
        assert_eq!(engine.pair_count(), 0);
    }
}
