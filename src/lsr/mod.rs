//! Linear sedimentation rates.
//!
//! - per-interval rates from tiepoint (or fitted) depth deltas (`rates`)
//! - piecewise-constant step expansions for plotting (`steps`)

pub mod rates;
pub mod steps;

pub use rates::*;
pub use steps::*;
