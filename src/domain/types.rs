//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - threaded between pipeline stages in memory
//! - exported to JSON/CSV
//! - handed to presenters without copying into bespoke view structs

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::math::AffineMap;

/// Depth unit conversion applied to every depth delta (m → cm).
pub const DEPTH_SCALE: f64 = 100.0;

/// Age unit conversion applied to every age delta (Ma → kyr).
pub const AGE_SCALE: f64 = 1000.0;

/// A depth–age tiepoint series (the age model).
///
/// Stored as two index-aligned columns in file order. Sortedness is not
/// enforced here; see `domain::validate_tiepoints`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tiepoints {
    pub depths: Vec<f64>,
    pub ages: Vec<f64>,
}

impl Tiepoints {
    pub fn new(depths: Vec<f64>, ages: Vec<f64>) -> Self {
        debug_assert_eq!(depths.len(), ages.len());
        Self { depths, ages }
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Number of inter-tiepoint intervals.
    pub fn interval_count(&self) -> usize {
        self.len().saturating_sub(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.depths.iter().copied().zip(self.ages.iter().copied())
    }
}

/// How to treat an interval whose two tiepoints share the same age.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalPolicy {
    /// Fail with `PipelineError::DegenerateInterval`.
    #[default]
    Reject,
    /// Compute the rate anyway; the result is ±inf or NaN.
    Propagate,
}

/// Least-squares polynomial fit of depth as a function of age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolynomialFit {
    pub degree: usize,
    /// Monomial coefficients in age, constant term first (`degree + 1` values).
    ///
    /// Reported for users; evaluating them at large ages loses precision, so
    /// the pipeline evaluates `basis_coefficients` instead.
    pub coefficients: Vec<f64>,
    /// Normalization applied to ages before solving.
    pub basis: AffineMap,
    /// Coefficients in `t = basis.apply(age)`, constant term first.
    pub basis_coefficients: Vec<f64>,
    /// Sum of squared residuals (unit weights).
    pub chi2: f64,
    /// Degrees of freedom: points − (degree + 1).
    pub ndf: usize,
}

impl PolynomialFit {
    /// `chi2 / ndf`, or `None` for an exactly determined fit.
    pub fn reduced_chi2(&self) -> Option<f64> {
        if self.ndf == 0 {
            None
        } else {
            Some(self.chi2 / self.ndf as f64)
        }
    }
}

/// Piecewise-constant view of a per-interval series.
///
/// Interval `i` contributes two vertices: `(ages[i], v)` and `(ages[i + 1], v)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepCurve {
    pub ages: Vec<f64>,
    pub values: Vec<f64>,
}

impl StepCurve {
    pub fn len(&self) -> usize {
        self.ages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ages.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ages.iter().copied().zip(self.values.iter().copied())
    }
}

/// Everything a single run computes, in pipeline order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub source: PathBuf,
    pub tiepoints: Tiepoints,
    /// Raw linear sedimentation rates (cm/kyr), one per interval.
    pub lsr_raw: Vec<f64>,
    pub fit: PolynomialFit,
    /// The fitted polynomial evaluated at each tiepoint age.
    pub fitted: Vec<f64>,
    /// Rates derived from consecutive fitted values, one per interval.
    pub lsr_smoothed: Vec<f64>,
    pub raw_steps: StepCurve,
    /// Smoothed steps, zeroed wherever the raw rate is exactly zero.
    pub smoothed_steps: StepCurve,
}

/// A full `lsr run` configuration as understood by the pipeline and presenters.
///
/// This is derived from CLI flags (plus environment defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub degree: usize,
    pub interval_policy: IntervalPolicy,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub svg: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
    pub debug_bundle: bool,
}

impl RunConfig {
    /// Minimal configuration: no plots, no exports.
    pub fn new(input: impl Into<PathBuf>, degree: usize) -> Self {
        Self {
            input: input.into(),
            degree,
            interval_policy: IntervalPolicy::Reject,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            svg: None,
            export_csv: None,
            export_json: None,
            debug_bundle: false,
        }
    }
}

/// Settings for synthetic tiepoint generation (`lsr synth`).
#[derive(Debug, Clone)]
pub struct SynthConfig {
    pub count: usize,
    pub seed: u64,
    /// Age of the first tiepoint (Ma).
    pub age_start: f64,
    /// Mean age step between tiepoints (Ma).
    pub age_step: f64,
    /// Baseline sedimentation rate (cm/kyr).
    pub rate: f64,
    /// Relative standard deviation of the per-interval rate.
    pub noise: f64,
    /// Probability that an interval is a hiatus (zero depth change).
    pub hiatus_prob: f64,
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_chi2_is_none_for_exact_fit() {
        let fit = PolynomialFit {
            degree: 1,
            coefficients: vec![0.0, 1.0],
            basis: AffineMap::identity(),
            basis_coefficients: vec![0.0, 1.0],
            chi2: 0.0,
            ndf: 0,
        };
        assert_eq!(fit.reduced_chi2(), None);

        let fit = PolynomialFit { ndf: 4, chi2: 2.0, ..fit };
        assert_eq!(fit.reduced_chi2(), Some(0.5));
    }

    #[test]
    fn interval_count_saturates() {
        assert_eq!(Tiepoints::default().interval_count(), 0);
        let t = Tiepoints::new(vec![0.0, 1.0, 2.0], vec![0.0, 0.5, 1.0]);
        assert_eq!(t.interval_count(), 2);
        assert_eq!(t.iter().nth(1), Some((1.0, 0.5)));
    }
}
