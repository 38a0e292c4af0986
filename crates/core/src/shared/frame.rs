use std::sync::{Arc, RwLock};

use thiserror::Error;

use super::orientation::Orientation;

/// Layout of the bytes in a frame's pixel buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Rgba,
    Bgra,
    /// NV21: full-resolution Y plane followed by interleaved V/U at half resolution.
    Yuv,
}

impl PixelFormat {
    /// Number of bytes a `width x height` buffer of this format occupies,
    /// or `None` when that does not fit in `usize`.
    pub fn buffer_len(self, width: u32, height: u32) -> Option<usize> {
        let w = width as usize;
        let h = height as usize;
        let pixels = w.checked_mul(h)?;
        match self {
            PixelFormat::Rgb => pixels.checked_mul(3),
            PixelFormat::Rgba | PixelFormat::Bgra => pixels.checked_mul(4),
            PixelFormat::Yuv => w
                .div_ceil(2)
                .checked_mul(h.div_ceil(2))?
                .checked_mul(2)?
                .checked_add(pixels),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame buffer was already released by the host")]
    Unavailable,
    #[error("frame has zero extent ({width}x{height})")]
    EmptyExtent { width: u32, height: u32 },
    #[error("frame extent {width}x{height} is too large for {format:?} pixels")]
    Oversized {
        width: u32,
        height: u32,
        format: PixelFormat,
    },
    #[error("{width}x{height} {format:?} frame needs {expected} bytes, buffer holds {actual}")]
    Malformed {
        width: u32,
        height: u32,
        format: PixelFormat,
        expected: usize,
        actual: usize,
    },
}

/// One camera capture as handed over by the host camera framework.
///
/// The pixel buffer is shared with the host, which may release it at any
/// time. Clones observe the same buffer, so a release through one clone is
/// visible to every other.
#[derive(Clone, Debug)]
pub struct Frame {
    buffer: Arc<RwLock<Option<Vec<u8>>>>,
    width: u32,
    height: u32,
    pixel_format: PixelFormat,
    orientation: Orientation,
    is_mirrored: bool,
    timestamp: i64,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, pixel_format: PixelFormat) -> Self {
        Self {
            buffer: Arc::new(RwLock::new(Some(data))),
            width,
            height,
            pixel_format,
            orientation: Orientation::Rotate0,
            is_mirrored: false,
            timestamp: 0,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_mirrored(mut self, is_mirrored: bool) -> Self {
        self.is_mirrored = is_mirrored;
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_mirrored(&self) -> bool {
        self.is_mirrored
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// False once the host has released the pixel buffer.
    pub fn is_valid(&self) -> bool {
        self.buffer.read().map(|b| b.is_some()).unwrap_or(false)
    }

    /// Drops the pixel buffer. Called by the host when the capture is recycled.
    pub fn release(&self) {
        match self.buffer.write() {
            Ok(mut buffer) => *buffer = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    /// Runs `f` over the pixel bytes while holding the buffer, so the host
    /// cannot release it mid-read.
    pub fn with_pixels<R>(&self, f: impl FnOnce(&[u8]) -> R) -> Result<R, FrameError> {
        let guard = self.buffer.read().map_err(|_| FrameError::Unavailable)?;
        let data = guard.as_deref().ok_or(FrameError::Unavailable)?;
        Ok(f(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let frame = Frame::new(vec![0u8; 12], 2, 2, PixelFormat::Rgb)
            .with_orientation(Orientation::Rotate90)
            .with_mirrored(true)
            .with_timestamp(1000);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.pixel_format(), PixelFormat::Rgb);
        assert_eq!(frame.orientation(), Orientation::Rotate90);
        assert!(frame.is_mirrored());
        assert_eq!(frame.timestamp(), 1000);
        assert!(frame.is_valid());
    }

    #[test]
    fn test_defaults_are_upright_unmirrored() {
        let frame = Frame::new(vec![0u8; 3], 1, 1, PixelFormat::Rgb);
        assert_eq!(frame.orientation(), Orientation::Rotate0);
        assert!(!frame.is_mirrored());
        assert_eq!(frame.timestamp(), 0);
    }

    #[test]
    fn test_with_pixels_reads_buffer() {
        let frame = Frame::new(vec![1, 2, 3], 1, 1, PixelFormat::Rgb);
        let sum = frame
            .with_pixels(|p| p.iter().map(|&v| v as u32).sum::<u32>())
            .unwrap();
        assert_eq!(sum, 6);
    }

    #[test]
    fn test_release_makes_frame_unavailable() {
        let frame = Frame::new(vec![0u8; 3], 1, 1, PixelFormat::Rgb);
        frame.release();
        assert!(!frame.is_valid());
        assert_eq!(frame.with_pixels(|p| p.len()), Err(FrameError::Unavailable));
    }

    #[test]
    fn test_release_through_clone_is_shared() {
        let frame = Frame::new(vec![0u8; 3], 1, 1, PixelFormat::Rgb);
        let host_copy = frame.clone();
        host_copy.release();
        assert!(!frame.is_valid());
    }

    #[test]
    fn test_buffer_len_per_format() {
        assert_eq!(PixelFormat::Rgb.buffer_len(4, 2), Some(24));
        assert_eq!(PixelFormat::Rgba.buffer_len(4, 2), Some(32));
        assert_eq!(PixelFormat::Bgra.buffer_len(4, 2), Some(32));
        // 4x2 luma + 2x1 chroma pairs
        assert_eq!(PixelFormat::Yuv.buffer_len(4, 2), Some(12));
        // odd dimensions round the chroma plane up
        assert_eq!(PixelFormat::Yuv.buffer_len(3, 3), Some(9 + 2 * 2 * 2));
    }

    #[test]
    fn test_buffer_len_overflow_is_none() {
        for format in [
            PixelFormat::Rgb,
            PixelFormat::Rgba,
            PixelFormat::Bgra,
            PixelFormat::Yuv,
        ] {
            assert_eq!(format.buffer_len(u32::MAX, u32::MAX), None, "{format:?}");
        }
    }
}
