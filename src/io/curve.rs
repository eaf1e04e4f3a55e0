//! Read/write run JSON files.
//!
//! Run JSON is the portable representation of one `lsr run`:
//! - the input tiepoints and where they came from
//! - fit coefficients and statistics
//! - raw/smoothed rates and their step curves, ready for plotting
//!
//! The schema is `domain::PipelineOutput`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::PipelineOutput;
use crate::error::AppError;
use crate::report::Presenter;

/// Writes the run JSON to `path`.
#[derive(Debug, Clone)]
pub struct JsonExportPresenter {
    pub path: PathBuf,
}

impl Presenter for JsonExportPresenter {
    fn present(&self, output: &PipelineOutput) -> Result<(), AppError> {
        write_output_json(&self.path, output)?;
        info!(path = %self.path.display(), "wrote run JSON");
        Ok(())
    }
}

/// Write a run JSON file.
pub fn write_output_json(path: &Path, output: &PipelineOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create run JSON '{}': {e}", path.display())))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, output)
        .map_err(|e| AppError::new(2, format!("Failed to write run JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write run JSON '{}': {e}", path.display())))?;

    Ok(())
}

/// Read a run JSON file.
pub fn read_output_json(path: &Path) -> Result<PipelineOutput, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open run JSON '{}': {e}", path.display())))?;
    let output: PipelineOutput =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid run JSON: {e}")))?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::analyze;
    use crate::domain::{IntervalPolicy, Tiepoints};

    #[test]
    fn json_keeps_fit_and_steps() {
        let t = Tiepoints::new(vec![0.0, 1.0, 2.5, 4.0], vec![0.0, 0.3, 0.8, 1.1]);
        let output = analyze(t, 2, IntervalPolicy::Reject).unwrap();

        let path = std::env::temp_dir().join(format!("lsr_run_{}.json", std::process::id()));
        write_output_json(&path, &output).unwrap();
        let back = read_output_json(&path);
        std::fs::remove_file(&path).ok();
        let back = back.unwrap();

        assert_eq!(back.fit.degree, 2);
        assert_eq!(back.fit.ndf, output.fit.ndf);
        assert_eq!(back.smoothed_steps.len(), output.smoothed_steps.len());
        assert_eq!(back.tiepoints, output.tiepoints);
        assert_eq!(back.fit.basis, output.fit.basis);
        assert_eq!(back.fit.basis_coefficients, output.fit.basis_coefficients);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn full_disk_is_reported() {
        let t = Tiepoints::new(vec![0.0, 1.0, 2.5], vec![0.0, 0.3, 0.8]);
        let output = analyze(t, 1, IntervalPolicy::Reject).unwrap();
        let err = write_output_json(Path::new("/dev/full"), &output).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn invalid_json_is_reported() {
        let path = std::env::temp_dir().join(format!("lsr_bad_{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let err = read_output_json(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert_eq!(err.exit_code(), 2);
    }
}
