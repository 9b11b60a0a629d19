//! Per-feed frame resampling onto the global tick grid.
//!
//! A pure read-select-write pipeline: for every output tick the feed either
//! contributes its nearest captured frame or, when the tick falls outside
//! the feed's covered range, a shared blank placeholder. No feedback, no
//! retries, no skipped ticks.

use contracts::{
    AlignmentWindow, FeedId, FrameImage, FrameSink, FrameSource, SyncError, TimestampIndex,
};
use serde::Serialize;
use tracing::{debug, instrument};

/// The per-tick resampling decision for one feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Emit the captured frame at `entry_index` in the feed's index
    Source { entry_index: usize, frame_id: u64 },
    /// Tick lies outside the feed's covered range; emit the blank frame
    Blank,
}

/// Select the frame for tick `t` from one feed's index.
///
/// Out-of-range ticks (bounds inclusive) resolve to `Blank`. In-range
/// ticks binary-search the ascending timestamps for the insertion point
/// and compare the two neighboring candidates by absolute distance.
///
/// Tie-break rule: on an exact distance tie the lower entry index wins.
/// This is definitional, not accidental; resampling the same input twice
/// must make byte-identical decisions.
pub fn select_frame(index: &TimestampIndex, t: f64) -> Selection {
    if !index.in_range(t) {
        return Selection::Blank;
    }

    let entries = index.entries();
    let split = entries.partition_point(|entry| entry.timestamp < t);

    let chosen = if split == 0 {
        0
    } else if split == entries.len() {
        entries.len() - 1
    } else {
        let before = t - entries[split - 1].timestamp;
        let after = entries[split].timestamp - t;
        // <= keeps the earlier entry on an exact tie
        if before <= after {
            split - 1
        } else {
            split
        }
    };

    Selection::Source {
        entry_index: chosen,
        frame_id: entries[chosen].frame_id,
    }
}

/// Outcome of resampling one feed
#[derive(Debug, Clone, Serialize)]
pub struct FeedReport {
    /// Which feed this report covers
    pub feed_id: FeedId,
    /// Total frames delivered to the writer (one per tick)
    pub frames_written: u64,
    /// Frames selected from the feed's captured timeline
    pub source_frames: u64,
    /// Blank placeholder frames for out-of-range ticks
    pub blank_frames: u64,
}

/// Walks the alignment window tick-by-tick for one feed at a time.
///
/// Feeds are independent: each call reads only the given index and writes
/// only the given sink, so callers may run one `resample` per feed
/// concurrently with no synchronization beyond joining.
#[derive(Debug, Clone, Copy)]
pub struct FrameResampler {
    window: AlignmentWindow,
}

impl FrameResampler {
    /// Create a resampler over the resolved window
    pub fn new(window: AlignmentWindow) -> Self {
        Self { window }
    }

    /// The window this resampler walks
    pub fn window(&self) -> &AlignmentWindow {
        &self.window
    }

    /// Compute the full decision sequence for one feed without any I/O.
    ///
    /// One decision per tick, in tick order. Deterministic for a given
    /// index and window.
    pub fn plan(&self, index: &TimestampIndex) -> Vec<Selection> {
        self.window
            .ticks()
            .map(|tick| select_frame(index, tick.t))
            .collect()
    }

    /// Resample one feed: select a frame per tick, stream it to the sink,
    /// finalize the sink.
    ///
    /// Exactly one write per tick, in strictly increasing tick order.
    ///
    /// # Errors
    /// - `FrameUnreadable` if a selected image cannot be retrieved; fatal
    ///   for this feed's output only
    /// - `SinkWrite` if the writer fails; no further ticks are issued
    #[instrument(
        name = "resample_feed",
        skip(self, index, source, sink),
        fields(feed_id = %index.feed_id(), ticks = self.window.tick_count())
    )]
    pub async fn resample<S, W>(
        &self,
        index: &TimestampIndex,
        source: &S,
        sink: &mut W,
    ) -> Result<FeedReport, SyncError>
    where
        S: FrameSource + Sync,
        W: FrameSink,
    {
        let blank = FrameImage::blank(index.width(), index.height(), index.channels());

        let mut report = FeedReport {
            feed_id: index.feed_id().clone(),
            frames_written: 0,
            source_frames: 0,
            blank_frames: 0,
        };

        for tick in self.window.ticks() {
            let frame = match select_frame(index, tick.t) {
                Selection::Source {
                    entry_index,
                    frame_id,
                } => {
                    let entry = index.entries()[entry_index];
                    metrics::histogram!(
                        "resample_time_error",
                        "feed_id" => index.feed_id().to_string()
                    )
                    .record((entry.timestamp - tick.t).abs());
                    report.source_frames += 1;
                    source.load_frame(frame_id)?
                }
                Selection::Blank => {
                    report.blank_frames += 1;
                    blank.clone()
                }
            };

            sink.write(&frame).await?;
            report.frames_written += 1;
        }

        sink.finish().await?;

        metrics::counter!(
            "resample_frames_total",
            "feed_id" => index.feed_id().to_string(),
            "kind" => "source"
        )
        .increment(report.source_frames);
        metrics::counter!(
            "resample_frames_total",
            "feed_id" => index.feed_id().to_string(),
            "kind" => "blank"
        )
        .increment(report.blank_frames);

        debug!(
            feed_id = %report.feed_id,
            frames = report.frames_written,
            blanks = report.blank_frames,
            "feed resampled"
        );

        Ok(report)
    }
}
