//! Time mapping parsing.
//!
//! The recorder persists one `time_mapping.json` per feed: a JSON array of
//! `[timestamp, frame_id]` pairs in ascending timestamp order. An array
//! rather than an object so that on-disk order is explicit; ascent is still
//! re-validated when the `TimestampIndex` is constructed.

use contracts::{FeedId, IndexEntry, SyncError};

/// Parse the persisted time mapping content into index entries.
///
/// # Errors
/// `FeedCorrupt` on any deserialization failure.
pub fn parse_time_mapping(feed_id: &FeedId, content: &str) -> Result<Vec<IndexEntry>, SyncError> {
    let pairs: Vec<(f64, u64)> = serde_json::from_str(content).map_err(|e| {
        SyncError::feed_corrupt(feed_id.clone(), format!("time mapping parse error: {e}"))
    })?;

    Ok(pairs
        .into_iter()
        .map(|(timestamp, frame_id)| IndexEntry {
            timestamp,
            frame_id,
        })
        .collect())
}
