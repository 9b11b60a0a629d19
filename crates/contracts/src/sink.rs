//! FrameSource / FrameSink traits - resampler I/O boundary
//!
//! The resampler reads selected frames through `FrameSource` and delivers
//! output frames through `FrameSink`, keeping the core free of codec and
//! container concerns.

use crate::{FrameImage, SyncError};

/// Read side: retrieve a persisted frame image by identifier.
///
/// Reads are deterministic over persisted input, so failures are not
/// retried; an unreadable frame is fatal for that feed's output.
pub trait FrameSource {
    /// Load and decode the frame image for `frame_id`
    ///
    /// # Errors
    /// `FrameUnreadable` if the image is missing or cannot be decoded
    fn load_frame(&self, frame_id: u64) -> Result<FrameImage, SyncError>;
}

/// Write side: per-feed output writer.
///
/// Exactly one writer per feed; frames arrive in strictly increasing tick
/// order and must be persisted in that order.
#[trait_variant::make(FrameSink: Send)]
pub trait LocalFrameSink {
    /// Writer name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Append one frame to the output
    ///
    /// # Errors
    /// Returns a write error (should include context); the caller stops
    /// issuing further ticks for this feed on failure
    async fn write(&mut self, frame: &FrameImage) -> Result<(), SyncError>;

    /// Finalize the output container
    async fn finish(&mut self) -> Result<(), SyncError>;
}
