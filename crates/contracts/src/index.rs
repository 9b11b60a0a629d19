//! TimestampIndex - one feed's captured timeline
//!
//! Ordered mapping from capture timestamp to frame identifier, with the
//! derived values every downstream stage reads (bounds, minimum gap,
//! frame geometry). Immutable after construction.

use serde::{Deserialize, Serialize};

use crate::{FeedId, SyncError};

/// One captured frame: when it was taken and which persisted image it is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Capture timestamp (seconds, midpoint of the capture call)
    pub timestamp: f64,

    /// Persisted image identifier, unique per feed
    pub frame_id: u64,
}

/// One feed's timeline, timestamps strictly ascending
#[derive(Debug, Clone)]
pub struct TimestampIndex {
    feed_id: FeedId,
    entries: Vec<IndexEntry>,
    /// First entry's timestamp
    start_time: f64,
    /// Last entry's timestamp
    end_time: f64,
    /// Minimum of consecutive timestamp differences
    min_gap: f64,
    /// Frame width, probed from the first persisted image
    width: u32,
    /// Frame height, probed from the first persisted image
    height: u32,
    /// Bytes per pixel, probed from the first persisted image
    channels: u8,
}

impl TimestampIndex {
    /// Build an index from raw entries, validating its invariants.
    ///
    /// # Errors
    /// - `InsufficientEntries` if fewer than two entries exist (a single
    ///   entry yields no inter-frame gap)
    /// - `FeedCorrupt` if timestamps are not strictly increasing; a zero
    ///   or negative gap would make the derived output rate undefined
    pub fn try_new(
        feed_id: FeedId,
        entries: Vec<IndexEntry>,
        width: u32,
        height: u32,
        channels: u8,
    ) -> Result<Self, SyncError> {
        if entries.len() < 2 {
            return Err(SyncError::InsufficientEntries {
                feed_id,
                count: entries.len(),
            });
        }

        let mut min_gap = f64::INFINITY;
        for pair in entries.windows(2) {
            let gap = pair[1].timestamp - pair[0].timestamp;
            if gap <= 0.0 {
                return Err(SyncError::feed_corrupt(
                    feed_id,
                    format!(
                        "timestamps not strictly increasing: {} then {}",
                        pair[0].timestamp, pair[1].timestamp
                    ),
                ));
            }
            min_gap = min_gap.min(gap);
        }

        let start_time = entries[0].timestamp;
        let end_time = entries[entries.len() - 1].timestamp;

        Ok(Self {
            feed_id,
            entries,
            start_time,
            end_time,
            min_gap,
            width,
            height,
            channels,
        })
    }

    /// Feed identifier
    #[inline]
    pub fn feed_id(&self) -> &FeedId {
        &self.feed_id
    }

    /// Entries in ascending timestamp order
    #[inline]
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// First capture timestamp
    #[inline]
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Last capture timestamp
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Minimum inter-frame gap (seconds), always > 0
    #[inline]
    pub fn min_gap(&self) -> f64 {
        self.min_gap
    }

    /// Frame width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per pixel
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Whether `t` falls inside this feed's covered range.
    ///
    /// Bounds are inclusive: a tick landing exactly on the first or last
    /// capture timestamp selects a real frame, not the blank.
    #[inline]
    pub fn in_range(&self, t: f64) -> bool {
        t >= self.start_time && t <= self.end_time
    }
}
