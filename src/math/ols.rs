//! Least squares solver.
//!
//! The polynomial fit solves one small regression problem per run:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - SVD rather than normal equations. Forming `XᵀX` squares the condition
//!   number, which matters for degree 9 Vandermonde designs.
//! - nalgebra's `QR::solve` is intended for square systems and panics for
//!   tall matrices, so it is not used here.
//! - Singular values below `SINGULAR_TOL × σ_max` are treated as zero, giving
//!   the minimum-norm solution for rank-deficient designs.

use nalgebra::{DMatrix, DVector};

/// Relative singular-value cutoff.
const SINGULAR_TOL: f64 = 1e-13;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the decomposition fails or produces a non-finite solution.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    if x.nrows() != y.len() || x.ncols() == 0 {
        return None;
    }

    let svd = x.clone().svd(true, true);
    let sigma_max = svd.singular_values.max();
    if !sigma_max.is_finite() || sigma_max <= 0.0 {
        return None;
    }

    let beta = svd.solve(y, SINGULAR_TOL * sigma_max).ok()?;
    beta.iter().all(|v| v.is_finite()).then_some(beta)
}
