//! Error types.
//!
//! - `PipelineError` is what library code returns: one variant per failure kind,
//!   so callers can match on what went wrong.
//! - `AppError` is what the `lsr` binary reports: a single message plus the
//!   process exit code.

use thiserror::Error;

/// Which tiepoint column a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Depth,
    Age,
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::Depth => "depth",
            Column::Age => "age",
        }
    }
}

/// Failures of the numerical pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A malformed input line (1-based line number).
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A column is not non-decreasing; `index` is the first offending row (0-based).
    #[error("{name} column is not sorted (line {line} is smaller than line {index})", name = .column.name(), line = .index + 1)]
    SortOrder { column: Column, index: usize },

    #[error("at least 2 tiepoints are required, got {got}")]
    TooFewTiepoints { got: usize },

    #[error("polynomial degree {degree} is outside the supported range 0..={max}", max = crate::fit::MAX_DEGREE)]
    Domain { degree: i64 },

    #[error("a degree {degree} fit needs at least {needed} points, got {got}", degree = .needed.saturating_sub(1))]
    InsufficientPoints { needed: usize, got: usize },

    /// Two consecutive tiepoints share the same age; `index` is the 0-based row
    /// ending the interval.
    #[error("zero age step between lines {index} and {line} (age {age}): sedimentation rate is undefined", line = .index + 1)]
    DegenerateInterval { index: usize, age: f64 },

    #[error("least-squares solve failed: {0}")]
    Solve(String),
}

impl PipelineError {
    /// Exit code used by the `lsr` binary for this error kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::Io(_) | PipelineError::Parse { .. } => 2,
            PipelineError::SortOrder { .. } | PipelineError::TooFewTiepoints { .. } => 3,
            PipelineError::Domain { .. }
            | PipelineError::InsufficientPoints { .. }
            | PipelineError::DegenerateInterval { .. }
            | PipelineError::Solve(_) => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// An error whose message has already been shown to the user.
    pub fn reported(exit_code: u8) -> Self {
        Self::new(exit_code, String::new())
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn is_reported(&self) -> bool {
        self.message.is_empty()
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
