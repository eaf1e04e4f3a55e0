//! Presentation of pipeline results.
//!
//! The numerical core never draws or prints anything. Everything that turns a
//! `PipelineOutput` into text, images, or files implements `Presenter`, and the
//! CLI simply runs the presenters the user asked for.

pub mod format;

pub use format::*;

use crate::domain::PipelineOutput;
use crate::error::AppError;

/// Something that consumes a finished run.
pub trait Presenter {
    fn present(&self, output: &PipelineOutput) -> Result<(), AppError>;
}

/// Prints the run summary (including the `chi2/ndf` line) to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryPresenter;

impl Presenter for SummaryPresenter {
    fn present(&self, output: &PipelineOutput) -> Result<(), AppError> {
        print!("{}", format_run_summary(output));
        Ok(())
    }
}
