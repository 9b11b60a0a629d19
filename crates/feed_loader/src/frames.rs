//! FrameDirectory - persisted frame images on disk.
//!
//! One image per frame identifier under `<feed>/frames/`, named by the
//! integer id. Decoded to interleaved RGB8.

use std::path::PathBuf;

use bytes::Bytes;
use contracts::{FeedId, FrameImage, FrameSource, SyncError};

/// Extensions probed for a frame image, in preference order
const FRAME_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Frame image source backed by a feed's frames directory
#[derive(Debug, Clone)]
pub struct FrameDirectory {
    feed_id: FeedId,
    dir: PathBuf,
}

impl FrameDirectory {
    /// Create a frame source rooted at `dir`
    pub fn new(feed_id: FeedId, dir: PathBuf) -> Self {
        Self { feed_id, dir }
    }

    /// Probe the frame for `frame_id` and return `(width, height, channels)`.
    ///
    /// Called once per feed, on the first indexed frame; the result is
    /// cached in the `TimestampIndex` and reused for the blank placeholder.
    pub fn probe(&self, frame_id: u64) -> Result<(u32, u32, u8), SyncError> {
        let frame = self.load_frame(frame_id)?;
        Ok((frame.width, frame.height, frame.channels))
    }

    fn frame_path(&self, frame_id: u64) -> Option<PathBuf> {
        FRAME_EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{frame_id}.{ext}")))
            .find(|path| path.exists())
    }
}

impl FrameSource for FrameDirectory {
    fn load_frame(&self, frame_id: u64) -> Result<FrameImage, SyncError> {
        let path = self.frame_path(frame_id).ok_or_else(|| {
            SyncError::frame_unreadable(
                self.feed_id.clone(),
                frame_id,
                format!("no image file under {}", self.dir.display()),
            )
        })?;

        let decoded = image::open(&path)
            .map_err(|e| {
                SyncError::frame_unreadable(self.feed_id.clone(), frame_id, e.to_string())
            })?
            .into_rgb8();

        Ok(FrameImage {
            width: decoded.width(),
            height: decoded.height(),
            channels: 3,
            data: Bytes::from(decoded.into_raw()),
        })
    }
}
