//! `lsr-curves` library crate.
//!
//! The binary (`lsr`) is a thin wrapper around this library so that:
//!
//! - the tiepoint pipeline is testable without spawning processes
//! - presenters (terminal, SVG, CSV/JSON exports) can be combined freely
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod debug;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod lsr;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
