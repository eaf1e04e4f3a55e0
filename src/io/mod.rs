//! Input/output helpers.
//!
//! - tiepoint file ingest (`ingest`)
//! - per-interval CSV and tiepoint exports (`export`)
//! - full run JSON read/write (`curve`)

pub mod curve;
pub mod export;
pub mod ingest;

pub use curve::*;
pub use export::*;
pub use ingest::*;
