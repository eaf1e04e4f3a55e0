//! Shared pipeline logic.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> validate -> raw LSR -> fit -> evaluate -> smoothed LSR -> steps
//!
//! Front-ends (the CLI, exports, tests) then only deal with presentation.

use std::path::Path;

use tracing::{info, warn};

use crate::domain::{IntervalPolicy, PipelineOutput, Tiepoints, validate_tiepoints};
use crate::error::PipelineError;
use crate::fit::fit_polynomial;
use crate::io::load_tiepoints;
use crate::lsr::{
    linear_sedimentation_rates, smoothed_sedimentation_rates, smoothed_step_curve, step_curve,
};
use crate::models::fitted_series;

/// Load a tiepoint file and run the full analysis on it.
pub fn run_pipeline(
    path: &Path,
    degree: usize,
    policy: IntervalPolicy,
) -> Result<PipelineOutput, PipelineError> {
    let tiepoints = load_tiepoints(path)?;
    let mut output = analyze(tiepoints, degree, policy)?;
    output.source = path.to_path_buf();
    Ok(output)
}

/// Run the analysis on an in-memory tiepoint series.
///
/// The fit treats age as the independent variable and depth as the observation,
/// and is evaluated back at each tiepoint age.
pub fn analyze(
    tiepoints: Tiepoints,
    degree: usize,
    policy: IntervalPolicy,
) -> Result<PipelineOutput, PipelineError> {
    // 1) Ordering.
    validate_tiepoints(&tiepoints)?;

    // 2) Raw rates.
    let lsr_raw = linear_sedimentation_rates(&tiepoints.depths, &tiepoints.ages, policy)?;

    // 3) Fit depth(age).
    let fit = fit_polynomial(&tiepoints.ages, &tiepoints.depths, degree)?;
    if fit.ndf == 0 {
        warn!(degree, "fit is exactly determined (ndf = 0); chi2/ndf is undefined");
    }

    // 4) Fitted series + smoothed rates.
    let fitted = fitted_series(&fit, &tiepoints.ages);
    let lsr_smoothed = smoothed_sedimentation_rates(&fitted, &tiepoints.ages, policy)?;

    // 5) Plot-ready step curves.
    let raw_steps = step_curve(&tiepoints.ages, &lsr_raw);
    let smoothed_steps = smoothed_step_curve(&tiepoints.ages, &lsr_smoothed, &lsr_raw);

    info!(
        tiepoints = tiepoints.len(),
        degree,
        chi2 = fit.chi2,
        ndf = fit.ndf,
        "analysis complete"
    );

    Ok(PipelineOutput {
        source: Default::default(),
        tiepoints,
        lsr_raw,
        fit,
        fitted,
        lsr_smoothed,
        raw_steps,
        smoothed_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Column;
    use crate::models::evaluate_fit;

    fn tiepoints(rows: &[(f64, f64)]) -> Tiepoints {
        Tiepoints::new(
            rows.iter().map(|r| r.0).collect(),
            rows.iter().map(|r| r.1).collect(),
        )
    }

    #[test]
    fn three_row_scenario() {
        let out = analyze(
            tiepoints(&[(0.0, 0.0), (10.0, 5.0), (20.0, 15.0)]),
            1,
            IntervalPolicy::Reject,
        )
        .unwrap();

        assert_eq!(out.lsr_raw, vec![0.2, 0.1]);
        assert_eq!(out.fit.coefficients.len(), 2);
        assert_eq!(out.fit.ndf, 1);
        assert_eq!(out.fitted.len(), 3);
        assert_eq!(out.lsr_smoothed.len(), 2);
        assert_eq!(out.raw_steps.ages, vec![0.0, 5.0, 5.0, 15.0]);
        assert_eq!(out.raw_steps.values, vec![0.2, 0.2, 0.1, 0.1]);

        // A linear fit has a constant slope, so both smoothed rates agree.
        let slope = out.fit.coefficients[1];
        for r in &out.lsr_smoothed {
            assert!((r - slope * 0.1).abs() < 1e-12);
        }
    }

    #[test]
    fn fitted_series_is_the_fit_at_each_age() {
        let out = analyze(
            tiepoints(&[(0.0, 0.0), (1.0, 0.2), (3.0, 0.5), (4.5, 0.9), (6.0, 1.4), (6.5, 1.6)]),
            2,
            IntervalPolicy::Reject,
        )
        .unwrap();

        for (f, &age) in out.fitted.iter().zip(&out.tiepoints.ages) {
            assert_eq!(*f, evaluate_fit(&out.fit, age));
        }
        let chi2: f64 = out
            .tiepoints
            .depths
            .iter()
            .zip(&out.fitted)
            .map(|(d, f)| (d - f).powi(2))
            .sum();
        assert!((chi2 - out.fit.chi2).abs() < 1e-9);
    }

    #[test]
    fn hiatus_interval_zeroes_smoothed_steps() {
        // Depth does not change between ages 2 and 3.
        let out = analyze(
            tiepoints(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (2.0, 3.0), (3.5, 4.0)]),
            1,
            IntervalPolicy::Reject,
        )
        .unwrap();

        assert_eq!(out.lsr_raw[2], 0.0);
        assert!(out.lsr_smoothed[2] != 0.0);
        assert_eq!(out.smoothed_steps.values[4], 0.0);
        assert_eq!(out.smoothed_steps.values[5], 0.0);
        assert_eq!(out.smoothed_steps.values[0], out.lsr_smoothed[0]);
    }

    #[test]
    fn unsorted_ages_stop_the_run() {
        let err = analyze(
            tiepoints(&[(0.0, 0.0), (1.0, 2.0), (2.0, 1.0)]),
            1,
            IntervalPolicy::Reject,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::SortOrder { column: Column::Age, index: 2 }
        ));
    }

    #[test]
    fn degree_out_of_range_is_a_domain_error() {
        let rows: Vec<(f64, f64)> = (0..15).map(|i| (i as f64, i as f64)).collect();
        let err = analyze(tiepoints(&rows), 10, IntervalPolicy::Reject).unwrap_err();
        assert!(matches!(err, PipelineError::Domain { degree: 10 }));
    }

    #[test]
    fn run_pipeline_reads_file_and_records_source() {
        let path = std::env::temp_dir().join(format!("lsr_pipeline_{}.csv", std::process::id()));
        std::fs::write(&path, "0,0\n10,5\n20,15\n").unwrap();
        let out = run_pipeline(&path, 1, IntervalPolicy::Reject);
        std::fs::remove_file(&path).ok();

        let out = out.unwrap();
        assert_eq!(out.source, path);
        assert_eq!(out.lsr_raw, vec![0.2, 0.1]);
    }
}
