//! Data sources other than tiepoint files.
//!
//! - seeded synthetic age models for demos and tests (`synthetic`)

pub mod synthetic;

pub use synthetic::*;
