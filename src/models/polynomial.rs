//! Polynomial evaluation.

use crate::domain::PolynomialFit;

/// Evaluate `c[0] + c[1]·x + ... + c[D]·x^D` (Horner's scheme).
///
/// An empty coefficient slice evaluates to `0.0`.
pub fn evaluate_polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Evaluate a fit at `x` through its normalized basis.
pub fn evaluate_fit(fit: &PolynomialFit, x: f64) -> f64 {
    evaluate_polynomial(&fit.basis_coefficients, fit.basis.apply(x))
}

/// Evaluate the fit at every abscissa.
///
/// For an age model the abscissae are the tiepoint ages, so the result is the
/// fitted depth at each tiepoint.
pub fn fitted_series(fit: &PolynomialFit, x: &[f64]) -> Vec<f64> {
    x.iter().map(|&v| evaluate_fit(fit, v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::fit_polynomial;

    /// Term-by-term evaluation with explicit powers.
    fn direct(coefficients: &[f64], x: f64) -> f64 {
        coefficients
            .iter()
            .enumerate()
            .map(|(i, c)| c * x.powi(i as i32))
            .sum()
    }

    #[test]
    fn horner_matches_direct_powers() {
        let c = [1.5, -2.0, 0.25, 3.0, -0.125];
        for &x in &[-2.0, -0.3, 0.0, 0.7, 4.2] {
            let a = evaluate_polynomial(&c, x);
            let b = direct(&c, x);
            assert!((a - b).abs() < 1e-10 * b.abs().max(1.0), "x={x}: {a} vs {b}");
        }
    }

    #[test]
    fn trivial_polynomials() {
        assert_eq!(evaluate_polynomial(&[], 3.0), 0.0);
        assert_eq!(evaluate_polynomial(&[7.0], 123.0), 7.0);
    }

    #[test]
    fn fitted_series_round_trips_chi2() {
        let ages = [0.0, 0.4, 1.1, 1.6, 2.5, 3.0, 4.2];
        let depths = [0.0, 2.0, 5.5, 6.0, 11.0, 12.5, 19.0];
        let fit = fit_polynomial(&ages, &depths, 3).unwrap();

        let fitted = fitted_series(&fit, &ages);
        assert_eq!(fitted.len(), ages.len());
        for (i, &a) in ages.iter().enumerate() {
            assert_eq!(fitted[i], evaluate_fit(&fit, a));
        }

        let chi2: f64 = depths.iter().zip(&fitted).map(|(d, f)| (d - f).powi(2)).sum();
        assert!((chi2 - fit.chi2).abs() < 1e-9);
    }
}
