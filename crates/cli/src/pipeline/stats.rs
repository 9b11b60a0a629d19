//! Run statistics.

use std::time::Duration;

use contracts::{AlignmentWindow, FeedId};
use serde::Serialize;
use sync_engine::FeedReport;

/// Statistics from one synchronization run
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    /// Per-feed resampling reports, one per feed that produced output
    pub reports: Vec<FeedReport>,

    /// Feeds excluded at load time (with a warning)
    pub dropped_feeds: Vec<FeedId>,

    /// Feeds whose resampling failed mid-run (other feeds continued)
    pub failed_feeds: Vec<FeedId>,

    /// The resolved alignment window
    pub window: AlignmentWindow,

    /// Derived global output frame rate
    pub fps: f64,

    /// Wall-clock duration of the run
    #[serde(skip)]
    pub duration: Duration,
}

impl RunStats {
    /// Total frames written across all feeds
    pub fn total_frames(&self) -> u64 {
        self.reports.iter().map(|r| r.frames_written).sum()
    }

    /// Frames processed per second of wall-clock time
    pub fn processing_rate(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.total_frames() as f64 / secs
        } else {
            0.0
        }
    }
}
