//! Curve fitting.
//!
//! Responsibilities:
//!
//! - validate the requested polynomial degree
//! - build a well-conditioned design and solve the least-squares problem
//! - report goodness of fit (chi-square, degrees of freedom)

pub mod polynomial;

pub use polynomial::*;
