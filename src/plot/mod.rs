//! Plot rendering.
//!
//! - fixed-grid terminal plots (`ascii`)
//! - two-panel SVG report via Plotters (`svg`)

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;
