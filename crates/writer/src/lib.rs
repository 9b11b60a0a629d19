//! # Writer
//!
//! `FrameSink` implementations for the per-feed output artifacts.
//!
//! - `FfmpegWriter` streams raw frames into an ffmpeg child process that
//!   encodes one video container per feed
//! - `ImageSequenceWriter` writes one PNG per tick, as an ffmpeg-free
//!   fallback and for tests
//!
//! Every feed owns exactly one writer; frames arrive in tick order.

mod sequence;
mod video;

pub use sequence::ImageSequenceWriter;
pub use video::{locate_ffmpeg, FfmpegWriter};

use std::path::{Path, PathBuf};

use contracts::{FrameImage, FrameSink, SyncError, TimestampIndex};

/// Which output artifact to produce per feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriterKind {
    /// One video container per feed (requires ffmpeg on PATH)
    #[default]
    Video,
    /// One PNG image per tick per feed
    Frames,
}

/// A feed's output writer, dispatching to the configured kind
pub enum FeedWriter {
    Video(FfmpegWriter),
    Frames(ImageSequenceWriter),
}

impl FeedWriter {
    /// Construct the writer for one feed under `output_dir`.
    ///
    /// `ffmpeg` overrides binary discovery for the video kind.
    pub async fn create(
        kind: WriterKind,
        output_dir: &Path,
        index: &TimestampIndex,
        fps: f64,
        ffmpeg: Option<&Path>,
    ) -> Result<Self, SyncError> {
        let feed_id = index.feed_id();
        match kind {
            WriterKind::Video => {
                let binary = match ffmpeg {
                    Some(path) => PathBuf::from(path),
                    None => locate_ffmpeg()?,
                };
                let output = output_dir.join(format!("{feed_id}.mp4"));
                let writer = FfmpegWriter::spawn(
                    &binary,
                    output,
                    feed_id.clone(),
                    index.width(),
                    index.height(),
                    index.channels(),
                    fps,
                )
                .await?;
                Ok(Self::Video(writer))
            }
            WriterKind::Frames => {
                let dir = output_dir.join(feed_id.as_str());
                let writer = ImageSequenceWriter::create(feed_id.clone(), dir)?;
                Ok(Self::Frames(writer))
            }
        }
    }
}

impl FrameSink for FeedWriter {
    fn name(&self) -> &str {
        match self {
            Self::Video(writer) => writer.name(),
            Self::Frames(writer) => writer.name(),
        }
    }

    async fn write(&mut self, frame: &FrameImage) -> Result<(), SyncError> {
        match self {
            Self::Video(writer) => writer.write(frame).await,
            Self::Frames(writer) => writer.write(frame).await,
        }
    }

    async fn finish(&mut self) -> Result<(), SyncError> {
        match self {
            Self::Video(writer) => writer.finish().await,
            Self::Frames(writer) => writer.finish().await,
        }
    }
}
