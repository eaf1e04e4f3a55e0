//! Per-interval sedimentation rates.
//!
//! For interval `i` (between rows `i - 1` and `i`):
//!
//! ```text
//! rate[i] = ((depth[i] - depth[i-1]) × 100) / ((age[i] - age[i-1]) × 1000)
//! ```
//!
//! i.e. depth in m and age in Ma become a rate in cm/kyr. The two scale
//! factors are applied separately, not folded into 0.1.

use tracing::warn;

use crate::domain::{AGE_SCALE, DEPTH_SCALE, IntervalPolicy};
use crate::error::PipelineError;

/// Raw LSR from tiepoint depths and ages.
///
/// Returns `len - 1` values (empty for fewer than two rows).
pub fn linear_sedimentation_rates(
    depths: &[f64],
    ages: &[f64],
    policy: IntervalPolicy,
) -> Result<Vec<f64>, PipelineError> {
    rates_from_deltas(depths, ages, policy)
}

/// Smoothed LSR from the fitted series (fitted depth at each tiepoint age).
///
/// Structurally identical to `linear_sedimentation_rates`, with fitted values in
/// the numerator.
pub fn smoothed_sedimentation_rates(
    fitted: &[f64],
    ages: &[f64],
    policy: IntervalPolicy,
) -> Result<Vec<f64>, PipelineError> {
    rates_from_deltas(fitted, ages, policy)
}

/// Rate for a single interval.
pub fn interval_rate(depth_delta: f64, age_delta: f64) -> f64 {
    (depth_delta * DEPTH_SCALE) / (age_delta * AGE_SCALE)
}

fn rates_from_deltas(
    numerators: &[f64],
    ages: &[f64],
    policy: IntervalPolicy,
) -> Result<Vec<f64>, PipelineError> {
    debug_assert_eq!(numerators.len(), ages.len());
    let n = numerators.len().min(ages.len());
    let mut out = Vec::with_capacity(n.saturating_sub(1));

    for i in 1..n {
        let age_delta = ages[i] - ages[i - 1];
        if age_delta == 0.0 && policy == IntervalPolicy::Reject {
            return Err(PipelineError::DegenerateInterval { index: i, age: ages[i] });
        }

        let rate = interval_rate(numerators[i] - numerators[i - 1], age_delta);
        if !rate.is_finite() {
            warn!(interval = i, age = ages[i], "non-finite sedimentation rate");
        }
        out.push(rate);
    }

    Ok(out)
}
