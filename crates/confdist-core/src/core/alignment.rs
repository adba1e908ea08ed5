//! Weighted RMSD under optimal rigid-body superposition.
//!
//! Solves the weighted orthogonal Procrustes (Kabsch) problem in closed form:
//! both point sets are centered at their weighted centroids, the optimal
//! rotation is recovered from the SVD of the weighted cross-covariance
//! matrix, and the residual is reported as a weighted root-mean-square
//! deviation.

use nalgebra::storage::Storage;
use nalgebra::{DVector, Dyn, Matrix, Matrix3, U1, Vector3};

/// Computes the weighted RMSD between two conformations after optimal
/// rigid-body superposition.
///
/// `a` and `b` are flattened point sets of equal length 3m (point `k`
/// occupies positions `3k..3k+2`); `weights` holds one non-negative weight
/// per point with a strictly positive total. Translation is removed by
/// centering both sets at their weighted centroids; the optimal rotation is
/// `V·D·Uᵗ` where `U Σ Vᵗ` is the SVD of the weighted cross-covariance
/// matrix and `D = diag(1, 1, s)` flips the weakest axis when the
/// unconstrained optimum would be a reflection (`s = sign(det(V·Uᵗ))`),
/// which is not a physical rigid-body motion.
///
/// The result is symmetric in the argument order up to floating-point
/// rounding, non-negative, and zero exactly when the sets coincide under
/// some proper rotation. A non-positive total weight is caller misuse and
/// yields a meaningless (NaN) value rather than an error; shape agreement is
/// only checked in debug builds.
pub fn weighted_rmsd<SA, SB>(
    a: &Matrix<f64, U1, Dyn, SA>,
    b: &Matrix<f64, U1, Dyn, SB>,
    weights: &DVector<f64>,
) -> f64
where
    SA: Storage<f64, U1, Dyn>,
    SB: Storage<f64, U1, Dyn>,
{
    let points = weights.len();
    debug_assert_eq!(a.ncols(), b.ncols());
    debug_assert_eq!(points * 3, a.ncols());

    let total: f64 = weights.sum();

    let mut com_a = Vector3::zeros();
    let mut com_b = Vector3::zeros();
    for k in 0..points {
        let w = weights[k];
        com_a += w * point(a, k);
        com_b += w * point(b, k);
    }
    com_a /= total;
    com_b /= total;

    let mut covariance = Matrix3::zeros();
    for k in 0..points {
        covariance += weights[k] * (point(a, k) - com_a) * (point(b, k) - com_b).transpose();
    }

    let svd = covariance.svd(true, true);
    let u = svd.u.unwrap();
    let v_t = svd.v_t.unwrap();

    // A negative determinant marks a reflection.
    let d = (u * v_t.transpose()).determinant();
    let mut correction = Matrix3::identity();
    correction[(2, 2)] = if d > 0.0 { 1.0 } else { -1.0 };

    // Rows-as-points rotation V·D·Uᵗ, applied to column vectors as U·D·Vᵗ.
    let rotation = u * correction * v_t;

    let mut residual = 0.0;
    for k in 0..points {
        let delta = (point(a, k) - com_a) - rotation * (point(b, k) - com_b);
        residual += weights[k] * delta.norm_squared();
    }
    (residual / total).sqrt()
}

#[inline]
fn point<S>(row: &Matrix<f64, U1, Dyn, S>, k: usize) -> Vector3<f64>
where
    S: Storage<f64, U1, Dyn>,
{
    Vector3::new(row[(0, 3 * k)], row[(0, 3 * k + 1)], row[(0, 3 * k + 2)])
}
