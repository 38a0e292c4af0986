use image::RgbImage;

use crate::detection::domain::model_image::ModelImage;
use crate::shared::frame::{Frame, FrameError, PixelFormat};

/// Converts host camera frames into detector-ready RGB images.
///
/// The output keeps the frame's sensor extent and orientation; only the
/// pixel encoding changes (and, when enabled, every channel is inverted).
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameAdapter {
    invert_colors: bool,
}

impl FrameAdapter {
    pub fn new(invert_colors: bool) -> Self {
        Self { invert_colors }
    }

    pub fn invert_colors(&self) -> bool {
        self.invert_colors
    }

    pub fn adapt(&self, frame: &Frame) -> Result<ModelImage, FrameError> {
        let width = frame.width();
        let height = frame.height();
        let format = frame.pixel_format();
        if !frame.is_valid() {
            return Err(FrameError::Unavailable);
        }
        if width == 0 || height == 0 {
            return Err(FrameError::EmptyExtent { width, height });
        }

        let expected = format
            .buffer_len(width, height)
            .ok_or(FrameError::Oversized {
                width,
                height,
                format,
            })?;
        let rgb = frame.with_pixels(|data| {
            if data.len() != expected {
                return Err(FrameError::Malformed {
                    width,
                    height,
                    format,
                    expected,
                    actual: data.len(),
                });
            }
            Ok(to_rgb(data, width, height, format))
        })??;

        let mut image = RgbImage::from_raw(width, height, rgb).ok_or(FrameError::Malformed {
            width,
            height,
            format,
            expected,
            actual: expected,
        })?;

        if self.invert_colors {
            image::imageops::invert(&mut image);
        }

        Ok(ModelImage::new(image, frame.orientation(), frame.is_mirrored()))
    }
}

fn to_rgb(data: &[u8], width: u32, height: u32, format: PixelFormat) -> Vec<u8> {
    match format {
        PixelFormat::Rgb => data.to_vec(),
        PixelFormat::Rgba => data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect(),
        PixelFormat::Bgra => data
            .chunks_exact(4)
            .flat_map(|px| [px[2], px[1], px[0]])
            .collect(),
        PixelFormat::Yuv => nv21_to_rgb(data, width as usize, height as usize),
    }
}

/// BT.601 full-range NV21 conversion. Chroma is shared by each 2x2 block.
fn nv21_to_rgb(data: &[u8], width: usize, height: usize) -> Vec<u8> {
    let luma_len = width * height;
    let chroma_stride = 2 * width.div_ceil(2);
    let mut rgb = Vec::with_capacity(luma_len * 3);

    for row in 0..height {
        for col in 0..width {
            let y = data[row * width + col] as f32;
            let chroma = luma_len + (row / 2) * chroma_stride + (col / 2) * 2;
            let v = data[chroma] as f32 - 128.0;
            let u = data[chroma + 1] as f32 - 128.0;

            let r = y + 1.402 * v;
            let g = y - 0.344_136 * u - 0.714_136 * v;
            let b = y + 1.772 * u;
            rgb.extend_from_slice(&[clamp_u8(r), clamp_u8(g), clamp_u8(b)]);
        }
    }
    rgb
}

fn clamp_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
