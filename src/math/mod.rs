//! Mathematical utilities: polynomial bases and least squares.

pub mod ols;
pub mod poly;

pub use ols::*;
pub use poly::*;
