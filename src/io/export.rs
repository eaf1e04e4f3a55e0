//! CSV exports.
//!
//! - per-interval rates, meant to be easy to consume in spreadsheets
//! - plain `depth,age` tiepoint files (the same format `ingest` reads)

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{PipelineOutput, Tiepoints};
use crate::error::AppError;
use crate::report::Presenter;

/// Writes the per-interval CSV to `path`.
#[derive(Debug, Clone)]
pub struct CsvExportPresenter {
    pub path: PathBuf,
}

impl Presenter for CsvExportPresenter {
    fn present(&self, output: &PipelineOutput) -> Result<(), AppError> {
        write_intervals_csv(&self.path, output)?;
        info!(path = %self.path.display(), rows = output.lsr_raw.len(), "wrote interval CSV");
        Ok(())
    }
}

/// Write one row per interval: boundary ages, depths, and both rates.
pub fn write_intervals_csv(path: &Path, output: &PipelineOutput) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_intervals(&mut file, output)
}

/// Interval rows to any writer.
pub fn write_intervals<W: Write>(out: &mut W, output: &PipelineOutput) -> Result<(), AppError> {
    writeln!(
        out,
        "interval,age_start,age_end,depth_start,depth_end,fitted_start,fitted_end,lsr_raw,lsr_smoothed,lsr_smoothed_plot"
    )
    .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    let t = &output.tiepoints;
    for i in 0..t.interval_count() {
        // Every interval contributes two identical values to the step curve.
        let plotted = output.smoothed_steps.values.get(2 * i).copied().unwrap_or(f64::NAN);
        writeln!(
            out,
            "{},{},{},{},{},{:.10},{:.10},{:.10},{:.10},{:.10}",
            i + 1,
            t.ages[i],
            t.ages[i + 1],
            t.depths[i],
            t.depths[i + 1],
            output.fitted[i],
            output.fitted[i + 1],
            output.lsr_raw[i],
            output.lsr_smoothed[i],
            plotted,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write tiepoints as `depth,age` lines.
pub fn write_tiepoints<W: Write>(out: &mut W, tiepoints: &Tiepoints) -> Result<(), AppError> {
    for (depth, age) in tiepoints.iter() {
        writeln!(out, "{depth},{age}")
            .map_err(|e| AppError::new(2, format!("Failed to write tiepoint row: {e}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::analyze;
    use crate::domain::IntervalPolicy;
    use crate::io::parse_tiepoints;

    #[test]
    fn interval_export_has_one_row_per_interval() {
        let t = Tiepoints::new(vec![0.0, 10.0, 20.0], vec![0.0, 5.0, 15.0]);
        let output = analyze(t, 1, IntervalPolicy::Reject).unwrap();

        let mut buf = Vec::new();
        write_intervals(&mut buf, &output).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("interval,age_start"));
        assert!(lines[1].starts_with("1,0,5,0,10,"));
        assert!(lines[2].contains(",0.1000000000,"));
    }

    #[test]
    fn tiepoint_export_reads_back() {
        let t = Tiepoints::new(vec![0.0, 1.25, 3.5], vec![0.1, 0.2, 0.45]);
        let mut buf = Vec::new();
        write_tiepoints(&mut buf, &t).unwrap();
        let back = parse_tiepoints(std::str::from_utf8(&buf).unwrap()).unwrap();
        assert_eq!(back, t);
    }
}
