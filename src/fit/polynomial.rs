//! Least-squares polynomial fit.
//!
//! Given abscissae `x_i` and observations `y_i`, find the degree-`D` polynomial
//! minimizing `Σ (y_i - p(x_i))^2`. For an age model the abscissa is age and
//! the observation is depth.
//!
//! The solve happens on `t = (x - center) / half_width ∈ [-1, 1]`. Both the
//! normalized coefficients and their monomial form in `x` are returned; chi2
//! and every evaluation use the normalized form, which stays accurate when
//! `x` sits far from zero (ages of tens or hundreds of Ma).

use nalgebra::DVector;
use tracing::debug;

use crate::domain::PolynomialFit;
use crate::error::PipelineError;
use crate::math::{AffineMap, solve_least_squares, to_monomial, vandermonde};
use crate::models::evaluate_polynomial;

/// Highest supported polynomial degree (10 coefficients).
pub const MAX_DEGREE: usize = 9;

/// Accept a user-supplied degree in `0..=MAX_DEGREE`.
pub fn check_degree(degree: i64) -> Result<usize, PipelineError> {
    usize::try_from(degree)
        .ok()
        .filter(|&d| d <= MAX_DEGREE)
        .ok_or(PipelineError::Domain { degree })
}

/// Fit a degree-`degree` polynomial of `y` against `x`.
pub fn fit_polynomial(x: &[f64], y: &[f64], degree: usize) -> Result<PolynomialFit, PipelineError> {
    if degree > MAX_DEGREE {
        return Err(PipelineError::Domain {
            degree: i64::try_from(degree).unwrap_or(i64::MAX),
        });
    }
    if x.len() != y.len() {
        return Err(PipelineError::Solve(format!(
            "abscissa and observation lengths differ ({} vs {})",
            x.len(),
            y.len()
        )));
    }

    let needed = degree + 1;
    let n = x.len();
    if n < needed {
        return Err(PipelineError::InsufficientPoints { needed, got: n });
    }

    let map = AffineMap::spanning(x);
    let t: Vec<f64> = x.iter().map(|&v| map.apply(v)).collect();
    let design = vandermonde(&t, degree);
    let obs = DVector::from_column_slice(y);

    let beta = solve_least_squares(&design, &obs)
        .ok_or_else(|| PipelineError::Solve(format!("degree {degree} design on {n} points is ill-conditioned")))?;
    let basis_coefficients: Vec<f64> = beta.iter().copied().collect();
    let coefficients = to_monomial(&basis_coefficients, map);

    // Same evaluation path as `models::fitted_series`, so chi2 agrees with the
    // fitted series exactly.
    let fitted: Vec<f64> = t
        .iter()
        .map(|&ti| evaluate_polynomial(&basis_coefficients, ti))
        .collect();
    let chi2 = chi_square(y, &fitted);
    if !chi2.is_finite() {
        return Err(PipelineError::Solve("non-finite chi-square".to_string()));
    }

    debug!(degree, n, chi2, "polynomial fit");

    Ok(PolynomialFit {
        degree,
        coefficients,
        basis: map,
        basis_coefficients,
        chi2,
        ndf: n - needed,
    })
}

/// Sum of squared residuals between observations and fitted values.
pub fn chi_square(y: &[f64], fitted: &[f64]) -> f64 {
    y.iter()
        .zip(fitted)
        .map(|(&yi, &fi)| {
            let r = yi - fi;
            r * r
        })
        .sum()
}
