//! Layered error definitions
//!
//! Categorized by source: feed loading / window resolution / resampling / sink

use thiserror::Error;

use crate::FeedId;

/// Unified error type
#[derive(Debug, Error)]
pub enum SyncError {
    // ===== Feed Loading Errors =====
    /// Persisted time mapping is absent
    #[error("feed '{feed_id}' not found: no time mapping at expected location")]
    FeedNotFound { feed_id: FeedId },

    /// Persisted mapping exists but cannot be used
    #[error("feed '{feed_id}' is corrupt: {message}")]
    FeedCorrupt { feed_id: FeedId, message: String },

    /// Fewer than two timestamp entries (no inter-frame gap can be derived)
    #[error("feed '{feed_id}' has {count} timestamp entries, need at least 2")]
    InsufficientEntries { feed_id: FeedId, count: usize },

    // ===== Window Resolution Errors =====
    /// Intersection window is empty or negative
    #[error("feeds do not overlap: intersection window [{start}, {end}) is empty")]
    NoOverlap { start: f64, end: f64 },

    /// No usable feeds remain
    #[error("no usable feeds provided")]
    NoFeedsProvided,

    // ===== Resampling Errors =====
    /// A selected frame image cannot be retrieved
    #[error("feed '{feed_id}' frame {frame_id} unreadable: {message}")]
    FrameUnreadable {
        feed_id: FeedId,
        frame_id: u64,
        message: String,
    },

    // ===== Sink Errors =====
    /// Output writer failure
    #[error("writer '{name}' error: {message}")]
    SinkWrite { name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// Create a feed-corrupt error
    pub fn feed_corrupt(feed_id: impl Into<FeedId>, message: impl Into<String>) -> Self {
        Self::FeedCorrupt {
            feed_id: feed_id.into(),
            message: message.into(),
        }
    }

    /// Create a frame-unreadable error
    pub fn frame_unreadable(
        feed_id: impl Into<FeedId>,
        frame_id: u64,
        message: impl Into<String>,
    ) -> Self {
        Self::FrameUnreadable {
            feed_id: feed_id.into(),
            frame_id,
            message: message.into(),
        }
    }

    /// Create a sink write error
    pub fn sink_write(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Whether this error only disqualifies a single feed.
    ///
    /// Load failures are recovered at the run level: the feed is dropped
    /// with a warning and the run continues with the remainder.
    pub fn is_per_feed(&self) -> bool {
        matches!(
            self,
            Self::FeedNotFound { .. }
                | Self::FeedCorrupt { .. }
                | Self::InsufficientEntries { .. }
                | Self::FrameUnreadable { .. }
        )
    }
}
