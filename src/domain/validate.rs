//! Ordering checks for tiepoint columns.
//!
//! Age models are expected to arrive sorted. We never sort on the fly: an
//! out-of-order row usually means a typo in the source file, and silently
//! reordering it would hide that.

use crate::domain::Tiepoints;
use crate::error::{Column, PipelineError};

/// True when every element is `>=` its predecessor.
///
/// Empty and single-element slices trivially pass.
pub fn is_non_decreasing(values: &[f64]) -> bool {
    first_decrease(values).is_none()
}

/// Index of the first element smaller than its predecessor.
fn first_decrease(values: &[f64]) -> Option<usize> {
    values
        .windows(2)
        .position(|w| w[1] < w[0])
        .map(|i| i + 1)
}

/// Check both columns (depth first, then age) and the minimum series length.
pub fn validate_tiepoints(tiepoints: &Tiepoints) -> Result<(), PipelineError> {
    if let Some(index) = first_decrease(&tiepoints.depths) {
        return Err(PipelineError::SortOrder {
            column: Column::Depth,
            index,
        });
    }
    if let Some(index) = first_decrease(&tiepoints.ages) {
        return Err(PipelineError::SortOrder {
            column: Column::Age,
            index,
        });
    }
    if tiepoints.len() < 2 {
        return Err(PipelineError::TooFewTiepoints {
            got: tiepoints.len(),
        });
    }
    Ok(())
}
