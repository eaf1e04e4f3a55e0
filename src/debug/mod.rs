//! Debug bundle writer for inspecting a run.
//!
//! The bundle is a markdown file with the raw tiepoints, every derived series,
//! and a sweep of fits over all supported degrees, so a surprising smoothed
//! curve can be compared against neighbouring degrees without rerunning.

use std::fmt::Write as _;
use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::domain::PipelineOutput;
use crate::error::AppError;
use crate::fit::{MAX_DEGREE, fit_polynomial};
use crate::report::Presenter;

/// Writes a debug bundle into `dir`.
#[derive(Debug, Clone)]
pub struct DebugPresenter {
    pub dir: PathBuf,
}

impl Presenter for DebugPresenter {
    fn present(&self, output: &PipelineOutput) -> Result<(), AppError> {
        let path = write_debug_bundle(&self.dir, output)?;
        info!(path = %path.display(), "wrote debug bundle");
        eprintln!("Debug bundle written to {}", path.display());
        Ok(())
    }
}

pub fn write_debug_bundle(dir: &Path, output: &PipelineOutput) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::new(2, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let stem = output
        .source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tiepoints".to_string());
    let path = dir.join(format!("lsr_debug_{stem}_deg{}_{ts}.md", output.fit.degree));

    let text = format_debug_bundle(output)
        .map_err(|e| AppError::new(2, format!("Failed to format debug bundle: {e}")))?;
    fs::write(&path, text).map_err(|e| AppError::new(2, format!("Failed to write debug file: {e}")))?;

    Ok(path)
}

/// Markdown body of the bundle.
pub fn format_debug_bundle(output: &PipelineOutput) -> Result<String, std::fmt::Error> {
    let mut s = String::new();
    let t = &output.tiepoints;

    writeln!(s, "# lsr debug bundle")?;
    writeln!(s, "- generated: {}", Local::now().to_rfc3339())?;
    writeln!(s, "- source: {}", output.source.display())?;
    writeln!(s, "- tiepoints: {}", t.len())?;
    writeln!(s, "- degree: {}", output.fit.degree)?;
    writeln!(s, "- chi2: {:e}", output.fit.chi2)?;
    writeln!(s, "- ndf: {}", output.fit.ndf)?;

    writeln!(s, "\n## Coefficients")?;
    writeln!(s, "| power | value |")?;
    writeln!(s, "| - | - |")?;
    for (i, c) in output.fit.coefficients.iter().enumerate() {
        writeln!(s, "| {i} | {c:.12e} |")?;
    }

    writeln!(s, "\n## Tiepoints")?;
    writeln!(s, "| row | depth | age | fitted | residual |")?;
    writeln!(s, "| - | - | - | - | - |")?;
    for (i, (depth, age)) in t.iter().enumerate() {
        let fitted = output.fitted.get(i).copied().unwrap_or(f64::NAN);
        writeln!(s, "| {} | {depth} | {age} | {fitted:.6} | {:.6} |", i + 1, depth - fitted)?;
    }

    writeln!(s, "\n## Intervals")?;
    writeln!(s, "| interval | age_start | age_end | lsr_raw | lsr_smoothed | plotted |")?;
    writeln!(s, "| - | - | - | - | - | - |")?;
    for i in 0..t.interval_count() {
        writeln!(
            s,
            "| {} | {} | {} | {:.6} | {:.6} | {:.6} |",
            i + 1,
            t.ages[i],
            t.ages[i + 1],
            output.lsr_raw[i],
            output.lsr_smoothed[i],
            output.smoothed_steps.values[2 * i],
        )?;
    }

    writeln!(s, "\n## Degree sweep")?;
    writeln!(s, "| degree | chi2 | ndf | chi2/ndf |")?;
    writeln!(s, "| - | - | - | - |")?;
    for degree in 0..=MAX_DEGREE.min(t.len().saturating_sub(1)) {
        match fit_polynomial(&t.ages, &t.depths, degree) {
            Ok(fit) => {
                let reduced = fit
                    .reduced_chi2()
                    .map(|v| format!("{v:.6e}"))
                    .unwrap_or_else(|| "n/a".to_string());
                writeln!(s, "| {degree} | {:.6e} | {} | {reduced} |", fit.chi2, fit.ndf)?;
            }
            Err(e) => writeln!(s, "| {degree} | failed: {e} | | |")?,
        }
    }

    Ok(s)
}
