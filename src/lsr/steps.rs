//! Step expansions of per-interval series.
//!
//! A rate belongs to an interval, not to a point, so plots draw it as a flat
//! segment from the interval's start age to its end age.

use crate::domain::StepCurve;

/// Expand `values[i]` over `[ages[i], ages[i + 1]]`.
pub fn step_curve(ages: &[f64], values: &[f64]) -> StepCurve {
    let n = values.len().min(ages.len().saturating_sub(1));
    let mut curve = StepCurve {
        ages: Vec::with_capacity(2 * n),
        values: Vec::with_capacity(2 * n),
    };

    for i in 0..n {
        curve.ages.push(ages[i]);
        curve.ages.push(ages[i + 1]);
        curve.values.push(values[i]);
        curve.values.push(values[i]);
    }

    curve
}

/// Step expansion of the smoothed rates.
///
/// Wherever the raw rate is exactly zero (a hiatus in the age model) the
/// smoothed segment is drawn at zero too, whatever the fit says.
pub fn smoothed_step_curve(ages: &[f64], smoothed: &[f64], raw: &[f64]) -> StepCurve {
    let masked: Vec<f64> = smoothed
        .iter()
        .zip(raw)
        .map(|(&s, &r)| if r == 0.0 { 0.0 } else { s })
        .collect();
    step_curve(ages, &masked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_values_and_pairs_boundary_ages() {
        let curve = step_curve(&[0.0, 5.0, 15.0], &[0.2, 0.1]);
        assert_eq!(curve.ages, vec![0.0, 5.0, 5.0, 15.0]);
        assert_eq!(curve.values, vec![0.2, 0.2, 0.1, 0.1]);
        assert_eq!(curve.len(), 4);
    }

    #[test]
    fn empty_inputs_give_empty_curve() {
        assert!(step_curve(&[1.0], &[]).is_empty());
        assert!(step_curve(&[], &[]).is_empty());
    }

    #[test]
    fn zero_raw_rate_forces_zero_smoothed_segment() {
        let ages = [0.0, 1.0, 2.0, 3.0];
        let raw = [0.5, 0.0, 0.25];
        let smoothed = [0.4, 0.33, 0.3];

        let curve = smoothed_step_curve(&ages, &smoothed, &raw);
        assert_eq!(curve.values, vec![0.4, 0.4, 0.0, 0.0, 0.3, 0.3]);
        assert_eq!(curve.ages, vec![0.0, 1.0, 1.0, 2.0, 2.0, 3.0]);
    }

    #[test]
    fn negative_zero_raw_rate_also_masks() {
        let curve = smoothed_step_curve(&[0.0, 1.0], &[0.7], &[-0.0]);
        assert_eq!(curve.values, vec![0.0, 0.0]);
    }
}
