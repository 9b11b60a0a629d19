//! ImageSequenceWriter - one PNG per output tick.
//!
//! Fallback artifact for hosts without ffmpeg, and the writer the
//! integration tests inspect. Files are named by tick index so the
//! sequence order is explicit on disk.

use std::path::PathBuf;

use contracts::{FeedId, FrameImage, SyncError};
use tracing::debug;

/// Per-feed PNG sequence writer
pub struct ImageSequenceWriter {
    name: String,
    feed_id: FeedId,
    dir: PathBuf,
    next_index: u64,
}

impl ImageSequenceWriter {
    /// Create the per-feed output directory and the writer over it
    pub fn create(feed_id: FeedId, dir: PathBuf) -> Result<Self, SyncError> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            name: format!("frames:{feed_id}"),
            feed_id,
            dir,
            next_index: 0,
        })
    }

    /// Number of frames written so far
    pub fn frames_written(&self) -> u64 {
        self.next_index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn write(&mut self, frame: &FrameImage) -> Result<(), SyncError> {
        let color = match frame.channels {
            1 => image::ColorType::L8,
            3 => image::ColorType::Rgb8,
            4 => image::ColorType::Rgba8,
            other => {
                return Err(SyncError::sink_write(
                    &self.name,
                    format!("unsupported channel count: {other}"),
                ))
            }
        };

        let path = self.dir.join(format!("{}.png", self.next_index));
        image::save_buffer(&path, &frame.data, frame.width, frame.height, color)
            .map_err(|e| SyncError::sink_write(&self.name, e.to_string()))?;

        self.next_index += 1;
        metrics::counter!(
            "writer_frames_total",
            "feed_id" => self.feed_id.to_string(),
            "kind" => "frames"
        )
        .increment(1);

        Ok(())
    }

    pub async fn finish(&mut self) -> Result<(), SyncError> {
        debug!(
            feed_id = %self.feed_id,
            frames = self.next_index,
            dir = %self.dir.display(),
            "image sequence finalized"
        );
        Ok(())
    }
}
