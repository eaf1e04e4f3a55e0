//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::PipelineOutput;

/// The reduced chi-square line, e.g. `chi2/ndf: 0.0123`.
///
/// An exactly determined fit has no residual degrees of freedom and prints `n/a`.
pub fn format_reduced_chi2(output: &PipelineOutput) -> String {
    match output.fit.reduced_chi2() {
        Some(v) => format!("chi2/ndf: {v}"),
        None => "chi2/ndf: n/a (ndf = 0)".to_string(),
    }
}

/// Format the full run summary (dataset, fit, rates).
pub fn format_run_summary(output: &PipelineOutput) -> String {
    let mut out = String::new();
    let t = &output.tiepoints;
    let fit = &output.fit;

    out.push_str("=== lsr - age model sedimentation rates ===\n");
    out.push_str(&format!("Input: {}\n", output.source.display()));
    if let (Some(first), Some(last)) = (t.iter().next(), t.iter().last()) {
        out.push_str(&format!(
            "Tiepoints: n={} | depth=[{:.3}, {:.3}] | age=[{:.4}, {:.4}] Ma\n",
            t.len(),
            first.0,
            last.0,
            first.1,
            last.1,
        ));
    }

    out.push_str("\nPolynomial fit (depth vs age):\n");
    out.push_str(&format!("- degree: {}\n", fit.degree));
    out.push_str(&format!("- coefficients: {}\n", fmt_vec(&fit.coefficients)));
    out.push_str(&format!("- chi2: {:.6} | ndf: {}\n", fit.chi2, fit.ndf));

    out.push_str("\nSedimentation rates (cm/kyr):\n");
    out.push_str(&format!(
        "{:>4} {:>12} {:>12} {:>12} {:>12}\n",
        "#", "age_start", "age_end", "raw", "smoothed"
    ));
    out.push_str(&format!(
        "{:->4} {:->12} {:->12} {:->12} {:->12}\n",
        "", "", "", "", ""
    ));
    for i in 0..t.interval_count() {
        out.push_str(&format!(
            "{:>4} {:>12.4} {:>12.4} {:>12} {:>12}\n",
            i + 1,
            t.ages[i],
            t.ages[i + 1],
            fmt_rate(output.lsr_raw[i]),
            fmt_rate(output.smoothed_steps.values[2 * i]),
        ));
    }

    out.push('\n');
    out.push_str(&format_reduced_chi2(output));
    out.push('\n');

    out
}

fn fmt_rate(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.4}")
    } else {
        format!("{v}")
    }
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6e}")).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::analyze;
    use crate::domain::{IntervalPolicy, Tiepoints};

    fn sample() -> PipelineOutput {
        let t = Tiepoints::new(vec![0.0, 10.0, 20.0, 25.0], vec![0.0, 5.0, 15.0, 17.0]);
        analyze(t, 1, IntervalPolicy::Reject).unwrap()
    }

    #[test]
    fn summary_ends_with_reduced_chi2() {
        let output = sample();
        let text = format_run_summary(&output);
        let last = text.lines().last().unwrap();
        assert!(last.starts_with("chi2/ndf: "), "{last}");
        let value: f64 = last.trim_start_matches("chi2/ndf: ").parse().unwrap();
        assert!((value - output.fit.chi2 / 2.0).abs() < 1e-12);
    }

    #[test]
    fn summary_lists_every_interval() {
        let output = sample();
        let text = format_run_summary(&output);
        assert!(text.contains("Tiepoints: n=4"));
        assert!(text.contains("0.2000"));
        assert!(text.contains("0.1000"));
        assert!(text.contains("0.2500"));
    }

    #[test]
    fn exact_fit_has_no_reduced_chi2() {
        let t = Tiepoints::new(vec![0.0, 1.0], vec![0.0, 1.0]);
        let output = analyze(t, 1, IntervalPolicy::Reject).unwrap();
        assert_eq!(format_reduced_chi2(&output), "chi2/ndf: n/a (ndf = 0)");
    }
}
