//! FfmpegWriter - video container output via an ffmpeg child process.
//!
//! Raw interleaved frames are piped to ffmpeg's stdin
//! (`-f rawvideo -i -`) and encoded to H.264 in an mp4 container at the
//! derived global frame rate. The child is reaped in `finish()`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use contracts::{FeedId, FrameImage, SyncError};
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin, Command};
use tracing::{debug, instrument};

/// Locate the ffmpeg binary on PATH
pub fn locate_ffmpeg() -> Result<PathBuf, SyncError> {
    which::which("ffmpeg")
        .map_err(|e| SyncError::sink_write("ffmpeg", format!("ffmpeg not found: {e}")))
}

/// Map a channel count to ffmpeg's rawvideo pixel format
fn pixel_format(channels: u8) -> Result<&'static str, SyncError> {
    match channels {
        1 => Ok("gray"),
        3 => Ok("rgb24"),
        4 => Ok("rgba"),
        other => Err(SyncError::sink_write(
            "ffmpeg",
            format!("unsupported channel count: {other}"),
        )),
    }
}

/// Build the ffmpeg argument list for one feed's output
fn encode_args(width: u32, height: u32, channels: u8, fps: f64, output: &Path) -> Vec<String> {
    let pix_fmt = pixel_format(channels).unwrap_or("rgb24");
    vec![
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-y".into(),
        "-f".into(),
        "rawvideo".into(),
        "-pixel_format".into(),
        pix_fmt.into(),
        "-video_size".into(),
        format!("{width}x{height}"),
        "-framerate".into(),
        format!("{fps}"),
        "-i".into(),
        "-".into(),
        "-c:v".into(),
        "libx264".into(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        output.display().to_string(),
    ]
}

/// Per-feed video container writer
pub struct FfmpegWriter {
    name: String,
    feed_id: FeedId,
    child: Child,
    stdin: Option<ChildStdin>,
    width: u32,
    height: u32,
    channels: u8,
    output: PathBuf,
    frames_written: u64,
}

impl FfmpegWriter {
    /// Spawn the encoder child for one feed.
    #[instrument(
        name = "ffmpeg_writer_spawn",
        skip(binary, output),
        fields(feed_id = %feed_id, fps)
    )]
    pub async fn spawn(
        binary: &Path,
        output: PathBuf,
        feed_id: FeedId,
        width: u32,
        height: u32,
        channels: u8,
        fps: f64,
    ) -> Result<Self, SyncError> {
        // Reject unsupported channel counts before spawning
        pixel_format(channels)?;

        let name = format!("ffmpeg:{feed_id}");
        let mut child = Command::new(binary)
            .args(encode_args(width, height, channels, fps, &output))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SyncError::sink_write(&name, format!("spawn failed: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SyncError::sink_write(&name, "child stdin unavailable"))?;

        debug!(output = %output.display(), "encoder started");

        Ok(Self {
            name,
            feed_id,
            child,
            stdin: Some(stdin),
            width,
            height,
            channels,
            output,
            frames_written: 0,
        })
    }

    /// Path of the container being written
    pub fn output(&self) -> &Path {
        &self.output
    }
}

// Implemented inherently rather than via the trait so FeedWriter's trait
// impl can delegate without double-dispatch.
impl FfmpegWriter {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn write(&mut self, frame: &FrameImage) -> Result<(), SyncError> {
        if !frame.matches(self.width, self.height, self.channels) {
            return Err(SyncError::sink_write(
                &self.name,
                format!(
                    "frame geometry {}x{}x{} does not match stream {}x{}x{}",
                    frame.width, frame.height, frame.channels, self.width, self.height,
                    self.channels
                ),
            ));
        }

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| SyncError::sink_write(&self.name, "writer already finished"))?;

        stdin
            .write_all(&frame.data)
            .await
            .map_err(|e| SyncError::sink_write(&self.name, format!("pipe write failed: {e}")))?;

        self.frames_written += 1;
        metrics::counter!(
            "writer_frames_total",
            "feed_id" => self.feed_id.to_string(),
            "kind" => "video"
        )
        .increment(1);

        Ok(())
    }

    pub async fn finish(&mut self) -> Result<(), SyncError> {
        // Closing stdin signals end-of-stream to the encoder
        drop(self.stdin.take());

        let status = self
            .child
            .wait()
            .await
            .map_err(|e| SyncError::sink_write(&self.name, format!("wait failed: {e}")))?;

        if !status.success() {
            return Err(SyncError::sink_write(
                &self.name,
                format!("encoder exited with {status}"),
            ));
        }

        debug!(
            feed_id = %self.feed_id,
            frames = self.frames_written,
            output = %self.output.display(),
            "container finalized"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_args_shape() {
        let args = encode_args(640, 480, 3, 25.0, Path::new("out/cam.mp4"));
        let joined = args.join(" ");
        assert!(joined.contains("-f rawvideo"));
        assert!(joined.contains("-pixel_format rgb24"));
        assert!(joined.contains("-video_size 640x480"));
        assert!(joined.contains("-framerate 25"));
        assert!(joined.contains("-i -"));
        assert!(joined.ends_with("out/cam.mp4"));
    }

    #[test]
    fn test_pixel_format_by_channels() {
        assert_eq!(pixel_format(1).unwrap(), "gray");
        assert_eq!(pixel_format(3).unwrap(), "rgb24");
        assert_eq!(pixel_format(4).unwrap(), "rgba");
        assert!(pixel_format(2).is_err());
    }
}
