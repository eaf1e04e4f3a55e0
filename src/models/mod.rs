//! Model evaluation.
//!
//! Models are implemented as small, pure functions so fitting and rate code can
//! stay generic over where the coefficients came from.

pub mod polynomial;

pub use polynomial::*;
