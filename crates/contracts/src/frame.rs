//! FrameImage - decoded frame payload
//!
//! Raw interleaved pixel data plus its geometry.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A decoded frame image
///
/// Pixel data is interleaved row-major, `channels` bytes per pixel
/// (3 = RGB8, 1 = grayscale). `Bytes` keeps clones zero-copy, which matters
/// for the blank placeholder that is reused for every out-of-range tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameImage {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Bytes per pixel
    pub channels: u8,

    /// Raw pixel data (zero-copy)
    pub data: Bytes,
}

impl FrameImage {
    /// Expected byte length for the given geometry
    #[inline]
    pub fn byte_len(width: u32, height: u32, channels: u8) -> usize {
        width as usize * height as usize * channels as usize
    }

    /// All-zero placeholder image for ticks outside a feed's covered range.
    ///
    /// Built once per feed and cloned per tick.
    pub fn blank(width: u32, height: u32, channels: u8) -> Self {
        Self {
            width,
            height,
            channels,
            data: Bytes::from(vec![0u8; Self::byte_len(width, height, channels)]),
        }
    }

    /// Whether this frame matches the given geometry
    #[inline]
    pub fn matches(&self, width: u32, height: u32, channels: u8) -> bool {
        self.width == width && self.height == height && self.channels == channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_geometry() {
        let blank = FrameImage::blank(4, 2, 3);
        assert_eq!(blank.data.len(), 24);
        assert!(blank.data.iter().all(|&b| b == 0));
        assert!(blank.matches(4, 2, 3));
        assert!(!blank.matches(4, 2, 1));
    }

    #[test]
    fn test_blank_clone_shares_buffer() {
        let blank = FrameImage::blank(8, 8, 3);
        let copy = blank.clone();
        assert_eq!(blank.data.as_ptr(), copy.data.as_ptr());
    }
}
