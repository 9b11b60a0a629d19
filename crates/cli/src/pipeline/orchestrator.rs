//! Pipeline orchestrator - coordinates loading, derivation, and resampling.
//!
//! Feeds are fully independent once the window is resolved: each one gets
//! its own tokio task, its own frame source, and its own writer. The only
//! values shared across tasks are the window and tick interval, both
//! immutable by then.

use std::path::PathBuf;
use std::time::Instant;

use contracts::{AlignmentPolicy, FeedId, SyncError};
use feed_loader::{FeedLoader, LoadedFeed};
use sync_engine::{output_fps, output_interval, resolve_window, FrameResampler};
use tokio::task::JoinSet;
use tracing::{info, warn};
use writer::{locate_ffmpeg, FeedWriter, WriterKind};

use super::RunStats;

/// Pipeline configuration, constructed once at startup and passed in;
/// no component reads ambient global state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Feed directories to load
    pub feed_dirs: Vec<PathBuf>,

    /// Directory receiving one output artifact per surviving feed
    pub output_dir: PathBuf,

    /// Alignment policy for the output window
    pub policy: AlignmentPolicy,

    /// Output artifact kind
    pub writer_kind: WriterKind,

    /// Explicit ffmpeg binary (None = discover on PATH)
    pub ffmpeg: Option<PathBuf>,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline to completion.
    ///
    /// # Errors
    /// - per-feed load failures are dropped with a warning; the underlying
    ///   error is returned only when no usable feed remains
    /// - `NoOverlap` under INTERSECTION is fatal and nothing is written
    pub async fn run(self) -> Result<RunStats, SyncError> {
        let start_time = Instant::now();

        let (feeds, dropped_feeds) = self.load_feeds();
        if feeds.is_empty() {
            return Err(SyncError::NoFeedsProvided);
        }

        let indexes: Vec<_> = feeds.iter().map(|feed| feed.index.clone()).collect();
        let interval = output_interval(&indexes).ok_or(SyncError::NoFeedsProvided)?;
        let fps = output_fps(interval);

        // Fatal on NoOverlap, before any output path is touched
        let window = resolve_window(self.config.policy, &indexes, interval)?;

        info!(
            feeds = feeds.len(),
            dropped = dropped_feeds.len(),
            fps = format!("{fps:.3}"),
            window_start = window.start,
            window_end = window.end,
            ticks = window.tick_count(),
            "pipeline configured"
        );

        // Resolve ffmpeg once so a missing binary fails the run, not each feed
        let ffmpeg = match self.config.writer_kind {
            WriterKind::Video => Some(match &self.config.ffmpeg {
                Some(path) => path.clone(),
                None => locate_ffmpeg()?,
            }),
            WriterKind::Frames => None,
        };

        std::fs::create_dir_all(&self.config.output_dir)?;

        let resampler = FrameResampler::new(window);
        let mut tasks = JoinSet::new();
        let mut failed_feeds: Vec<FeedId> = Vec::new();

        for feed in feeds {
            let feed_id = feed.index.feed_id().clone();
            let sink = match FeedWriter::create(
                self.config.writer_kind,
                &self.config.output_dir,
                &feed.index,
                fps,
                ffmpeg.as_deref(),
            )
            .await
            {
                Ok(sink) => sink,
                Err(e) => {
                    warn!(feed_id = %feed_id, error = %e, "writer creation failed, feed skipped");
                    failed_feeds.push(feed_id);
                    continue;
                }
            };

            tasks.spawn(async move {
                let LoadedFeed { index, frames } = feed;
                let feed_id = index.feed_id().clone();
                let mut sink = sink;
                let result = resampler.resample(&index, &frames, &mut sink).await;
                (feed_id, result)
            });
        }

        let mut reports = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(report))) => {
                    info!(
                        feed_id = %report.feed_id,
                        frames = report.frames_written,
                        blanks = report.blank_frames,
                        "feed output complete"
                    );
                    reports.push(report);
                }
                Ok((feed_id, Err(e))) => {
                    // Fatal for this feed's output only; the others continue
                    warn!(feed_id = %feed_id, error = %e, "feed resampling failed");
                    failed_feeds.push(feed_id);
                }
                Err(e) => {
                    warn!(error = %e, "feed task panicked");
                }
            }
        }

        reports.sort_by(|a, b| a.feed_id.as_str().cmp(b.feed_id.as_str()));

        let stats = RunStats {
            reports,
            dropped_feeds,
            failed_feeds,
            window,
            fps,
            duration: start_time.elapsed(),
        };

        info!(
            feeds = stats.reports.len(),
            dropped = stats.dropped_feeds.len(),
            failed = stats.failed_feeds.len(),
            total_frames = stats.total_frames(),
            duration_secs = format!("{:.3}", stats.duration.as_secs_f64()),
            rate = format!("{:.1} frames/s", stats.processing_rate()),
            "run complete"
        );

        Ok(stats)
    }

    /// Load every requested feed, dropping unusable ones with a warning
    fn load_feeds(&self) -> (Vec<LoadedFeed>, Vec<FeedId>) {
        let mut feeds = Vec::with_capacity(self.config.feed_dirs.len());
        let mut dropped = Vec::new();

        for dir in &self.config.feed_dirs {
            match FeedLoader::load(dir) {
                Ok(feed) => feeds.push(feed),
                Err(e) => {
                    warn!(feed = %dir.display(), error = %e, "feed excluded from run");
                    dropped.push(FeedId::from(
                        dir.file_name()
                            .and_then(|name| name.to_str())
                            .unwrap_or("feed"),
                    ));
                }
            }
        }

        (feeds, dropped)
    }
}
