//! Global output rate estimation.
//!
//! The output grid must be at least as fine as the fastest feed's finest
//! inter-frame gap, so no feed's real frame is skipped by resampling.

use contracts::TimestampIndex;

/// Global tick interval: minimum over all feeds of their minimum gap.
///
/// Returns `None` for an empty slice. Each index guarantees `min_gap > 0`
/// at construction, so the result is always positive and the derived rate
/// finite.
pub fn output_interval(indexes: &[TimestampIndex]) -> Option<f64> {
    indexes
        .iter()
        .map(|index| index.min_gap())
        .min_by(|a, b| a.total_cmp(b))
}

/// Global output frame rate for the given tick interval
#[inline]
pub fn output_fps(interval: f64) -> f64 {
    1.0 / interval
}
