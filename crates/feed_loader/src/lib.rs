//! # Feed Loader
//!
//! Loads one recorded feed from disk and materializes its contracts.
//!
//! Responsibilities:
//! - Parse the persisted time mapping (`time_mapping.json`)
//! - Validate it (entry count, strict timestamp ascent)
//! - Probe the first frame image for resolution and channel count
//! - Hand back a `TimestampIndex` plus a `FrameDirectory` frame source
//!
//! # Example
//!
//! ```no_run
//! use feed_loader::FeedLoader;
//! use std::path::Path;
//!
//! let feed = FeedLoader::load(Path::new("front_door")).unwrap();
//! println!("{} frames", feed.index.entries().len());
//! ```

mod frames;
mod parser;

pub use frames::FrameDirectory;

use std::path::Path;

use contracts::{FeedId, SyncError, TimestampIndex};
use tracing::debug;

/// File name of the persisted time mapping inside a feed directory
pub const TIME_MAPPING_FILE: &str = "time_mapping.json";

/// A fully materialized feed: its timeline plus access to its images
#[derive(Debug)]
pub struct LoadedFeed {
    /// Validated, immutable timeline
    pub index: TimestampIndex,
    /// Frame image source rooted at the feed's frames directory
    pub frames: FrameDirectory,
}

/// Feed loader
///
/// Provides static methods to load a feed from its directory. The feed id
/// is the directory name.
pub struct FeedLoader;

impl FeedLoader {
    /// Load a feed from its directory.
    ///
    /// # Errors
    /// - `FeedNotFound` if the time mapping file is absent
    /// - `FeedCorrupt` if deserialization fails, timestamps are not
    ///   strictly ascending, or the first frame image cannot be probed
    /// - `InsufficientEntries` for fewer than two entries
    pub fn load(dir: &Path) -> Result<LoadedFeed, SyncError> {
        let feed_id = Self::feed_id_from_dir(dir);

        let mapping_path = dir.join(TIME_MAPPING_FILE);
        if !mapping_path.exists() {
            return Err(SyncError::FeedNotFound { feed_id });
        }

        let content = std::fs::read_to_string(&mapping_path)?;
        let entries = parser::parse_time_mapping(&feed_id, &content)?;
        if entries.is_empty() {
            return Err(SyncError::InsufficientEntries { feed_id, count: 0 });
        }

        let frames = FrameDirectory::new(feed_id.clone(), dir.join("frames"));
        let (width, height, channels) = frames.probe(entries[0].frame_id).map_err(|e| {
            SyncError::feed_corrupt(feed_id.clone(), format!("first frame unreadable: {e}"))
        })?;

        let index = TimestampIndex::try_new(feed_id, entries, width, height, channels)?;

        debug!(
            feed_id = %index.feed_id(),
            entries = index.entries().len(),
            start = index.start_time(),
            end = index.end_time(),
            min_gap = index.min_gap(),
            width,
            height,
            "feed loaded"
        );

        Ok(LoadedFeed { index, frames })
    }

    /// Derive the feed id from its directory name
    fn feed_id_from_dir(dir: &Path) -> FeedId {
        dir.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_else(|| dir.to_str().unwrap_or("feed"))
            .into()
    }
}
