//! Monomial bases on a normalized abscissa.
//!
//! Raw Vandermonde matrices are badly conditioned once the degree grows: with
//! ages around 10 Ma, the `x^9` column is nine orders of magnitude larger than
//! the constant column. We therefore build the design on
//!
//! ```text
//! t = (x - center) / half_width   ∈ [-1, 1]
//! ```
//!
//! and convert the solved coefficients back to powers of `x` afterwards.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Affine map from the data range onto `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMap {
    pub center: f64,
    pub half_width: f64,
}

impl AffineMap {
    /// Map covering `[min(x), max(x)]`.
    ///
    /// A zero-width (or empty) range maps with unit scale so `t` stays finite.
    pub fn spanning(x: &[f64]) -> Self {
        let (lo, hi) = x
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if !(lo.is_finite() && hi.is_finite()) {
            return Self::identity();
        }
        let half_width = (hi - lo) / 2.0;
        Self {
            center: lo + half_width,
            half_width: if half_width > 0.0 { half_width } else { 1.0 },
        }
    }

    pub fn identity() -> Self {
        Self {
            center: 0.0,
            half_width: 1.0,
        }
    }

    pub fn apply(&self, x: f64) -> f64 {
        (x - self.center) / self.half_width
    }
}

/// Vandermonde design: row `i` is `[1, t_i, t_i^2, ..., t_i^degree]`.
pub fn vandermonde(t: &[f64], degree: usize) -> DMatrix<f64> {
    DMatrix::from_fn(t.len(), degree + 1, |i, j| {
        let mut v = 1.0;
        for _ in 0..j {
            v *= t[i];
        }
        v
    })
}

/// Re-express `Σ a_k t^k` (with `t = map.apply(x)`) as `Σ b_j x^j`.
///
/// Works like Horner's scheme on polynomials: starting from the leading
/// coefficient, repeatedly multiply by `(x - center) / half_width` and add the
/// next coefficient.
pub fn to_monomial(coeffs_t: &[f64], map: AffineMap) -> Vec<f64> {
    let n = coeffs_t.len();
    let mut out = vec![0.0; n];
    let c = map.center;
    let h = map.half_width;

    for (deg_so_far, &a) in coeffs_t.iter().rev().enumerate() {
        // out holds a polynomial of degree `deg_so_far - 1`; multiply by (x - c)/h.
        for j in (0..=deg_so_far.min(n - 1)).rev() {
            let shifted = if j > 0 { out[j - 1] } else { 0.0 };
            out[j] = (shifted - c * out[j]) / h;
        }
        out[0] += a;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(coeffs: &[f64], x: f64) -> f64 {
        coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    #[test]
    fn spanning_map_covers_unit_interval() {
        let map = AffineMap::spanning(&[2.0, 4.0, 10.0]);
        assert!((map.apply(2.0) + 1.0).abs() < 1e-15);
        assert!((map.apply(10.0) - 1.0).abs() < 1e-15);
        assert!(map.apply(6.0).abs() < 1e-15);
    }

    #[test]
    fn degenerate_range_keeps_unit_scale() {
        let map = AffineMap::spanning(&[3.0, 3.0]);
        assert_eq!(map.half_width, 1.0);
        assert_eq!(map.apply(3.0), 0.0);
        assert_eq!(AffineMap::spanning(&[]), AffineMap::identity());
    }

    #[test]
    fn vandermonde_rows_are_geometric() {
        let v = vandermonde(&[2.0, 3.0], 2);
        assert_eq!(v.nrows(), 2);
        assert_eq!(v.ncols(), 3);
        assert_eq!(v[(0, 2)], 4.0);
        assert_eq!(v[(1, 1)], 3.0);
        assert_eq!(v[(1, 2)], 9.0);
    }

    #[test]
    fn monomial_conversion_preserves_values() {
        let map = AffineMap {
            center: 5.0,
            half_width: 2.5,
        };
        let coeffs_t = [0.3, -1.2, 0.7, 2.0];
        let coeffs_x = to_monomial(&coeffs_t, map);
        assert_eq!(coeffs_x.len(), coeffs_t.len());

        for &x in &[0.0, 2.5, 5.0, 7.1, 9.9] {
            let expected = eval(&coeffs_t, map.apply(x));
            let actual = eval(&coeffs_x, x);
            assert!((expected - actual).abs() < 1e-10, "x={x}: {expected} vs {actual}");
        }
    }

    #[test]
    fn identity_map_is_a_no_op() {
        let coeffs = [1.0, 2.0, 3.0];
        assert_eq!(to_monomial(&coeffs, AffineMap::identity()), coeffs.to_vec());
    }
}
