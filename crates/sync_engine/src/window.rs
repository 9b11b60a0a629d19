//! Alignment window resolution.

use contracts::{AlignmentPolicy, AlignmentWindow, SyncError, TimestampIndex};
use tracing::debug;

/// Compute the output window from all feeds' index bounds.
///
/// - UNION spans the full range covered by any feed and is well-formed
///   whenever at least one feed exists
/// - INTERSECTION is restricted to the range covered by all feeds and
///   fails with `NoOverlap` when that range is empty or negative
///
/// # Errors
/// - `NoFeedsProvided` for an empty slice
/// - `NoOverlap` for an empty intersection window
pub fn resolve_window(
    policy: AlignmentPolicy,
    indexes: &[TimestampIndex],
    interval: f64,
) -> Result<AlignmentWindow, SyncError> {
    if indexes.is_empty() {
        return Err(SyncError::NoFeedsProvided);
    }

    let starts = indexes.iter().map(|index| index.start_time());
    let ends = indexes.iter().map(|index| index.end_time());

    let (start, end) = match policy {
        AlignmentPolicy::Union => (
            starts.fold(f64::INFINITY, f64::min),
            ends.fold(f64::NEG_INFINITY, f64::max),
        ),
        AlignmentPolicy::Intersection => (
            starts.fold(f64::NEG_INFINITY, f64::max),
            ends.fold(f64::INFINITY, f64::min),
        ),
    };

    if start >= end {
        return Err(SyncError::NoOverlap { start, end });
    }

    debug!(?policy, start, end, interval, "alignment window resolved");

    Ok(AlignmentWindow {
        start,
        end,
        interval,
    })
}
