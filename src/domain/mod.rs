//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the tiepoint series and its ordering checks (`Tiepoints`, `validate_tiepoints`)
//! - fit and rate outputs (`PolynomialFit`, `StepCurve`, `PipelineOutput`)
//! - run configuration (`RunConfig`, `SynthConfig`, `IntervalPolicy`)

pub mod types;
pub mod validate;

pub use types::*;
pub use validate::*;
