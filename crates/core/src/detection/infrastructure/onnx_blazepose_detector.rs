/// BlazePose landmark model run through ONNX Runtime via `ort`.
///
/// The image is turned upright before inference, letterboxed to the model's
/// square input and normalized to [0,1]. Landmarks come back in letterbox
/// pixels and are mapped to sensor-space coordinates of the original image.
use std::path::Path;

use image::RgbImage;

use crate::detection::domain::landmark_type::LandmarkType;
use crate::detection::domain::model_image::ModelImage;
use crate::detection::domain::pose_detector_client::{DetectorMode, PoseDetectorClient};
use crate::detection::domain::raw_pose::{RawLandmark, RawPose};
use crate::shared::constants::LANDMARK_COUNT;
use crate::shared::orientation::Orientation;

use super::execution_provider::preferred_execution_providers;

/// Fallback input resolution when the model doesn't specify dimensions.
const DEFAULT_INPUT_SIZE: u32 = 256;

/// Minimum pose-presence score to report any landmarks.
pub const DEFAULT_PRESENCE_THRESHOLD: f32 = 0.5;

/// x, y, z, visibility, presence per landmark.
const VALUES_PER_LANDMARK: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TensorLayout {
    Nhwc,
    Nchw,
}

pub struct OnnxBlazeposeDetector {
    session: ort::session::Session,
    input_size: u32,
    layout: TensorLayout,
    presence_threshold: f32,
}

impl OnnxBlazeposeDetector {
    /// Load a BlazePose landmark model.
    ///
    /// Input size and layout are read from the model's first input: `[1, S, S, 3]`
    /// is NHWC, `[1, 3, S, S]` is NCHW. Dynamic shapes fall back to 256 NHWC.
    pub fn new(
        model_path: &Path,
        mode: DetectorMode,
        presence_threshold: f32,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?
            .with_execution_providers(preferred_execution_providers())?
            .commit_from_file(model_path)?;

        let (input_size, layout) = session
            .inputs()
            .first()
            .and_then(|input| {
                if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                    input_geometry(shape)
                } else {
                    None
                }
            })
            .unwrap_or((DEFAULT_INPUT_SIZE, TensorLayout::Nhwc));

        log::info!(
            "Loaded pose model {} ({}x{} {:?}, {:?} mode)",
            model_path.display(),
            input_size,
            input_size,
            layout,
            mode
        );

        Ok(Self {
            session,
            input_size,
            layout,
            presence_threshold,
        })
    }
}

impl PoseDetectorClient for OnnxBlazeposeDetector {
    fn process(&mut self, image: &ModelImage) -> Result<RawPose, Box<dyn std::error::Error>> {
        let sensor_w = image.width();
        let sensor_h = image.height();

        // 1. Upright + letterbox + normalize
        let upright = upright(image.image(), image.orientation());
        let (input_tensor, letterbox) = letterbox(&upright, self.input_size, self.layout);

        // 2. Inference
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() < 1 {
            return Err("pose model produced no outputs".into());
        }

        // Output 1, when present, is the pose-presence score.
        if outputs.len() > 1 {
            let flag = outputs[1].try_extract_array::<f32>()?;
            let score = flag.iter().next().copied().unwrap_or(0.0);
            if score < self.presence_threshold {
                return Ok(RawPose::empty());
            }
        }

        let landmarks = outputs[0].try_extract_array::<f32>()?;
        let values: Vec<f32> = landmarks.iter().copied().collect();

        // 3. Decode in upright space, then map back to sensor space
        let pose = decode_landmarks(&values, &letterbox)?;
        let orientation = image.orientation();
        Ok(RawPose::new(
            pose.landmarks()
                .iter()
                .map(|lm| {
                    let position = to_sensor(lm.position, orientation, sensor_w, sensor_h);
                    let mut mapped = RawLandmark::new(lm.landmark_type, position, lm.depth());
                    mapped.visibility = lm.visibility;
                    mapped
                })
                .collect(),
        ))
    }
}

fn input_geometry(shape: &[i64]) -> Option<(u32, TensorLayout)> {
    if shape.len() < 4 {
        return None;
    }
    if shape[3] == 3 && shape[1] > 0 {
        Some((shape[1] as u32, TensorLayout::Nhwc))
    } else if shape[1] == 3 && shape[2] > 0 {
        Some((shape[2] as u32, TensorLayout::Nchw))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Rotates a sensor-space image clockwise by the frame orientation.
fn upright(image: &RgbImage, orientation: Orientation) -> RgbImage {
    match orientation {
        Orientation::Rotate0 => image.clone(),
        Orientation::Rotate90 => image::imageops::rotate90(image),
        Orientation::Rotate180 => image::imageops::rotate180(image),
        Orientation::Rotate270 => image::imageops::rotate270(image),
    }
}

/// Maps a point in the upright image back to the sensor image it came from.
fn to_sensor(
    (u, v): (f64, f64),
    orientation: Orientation,
    sensor_w: u32,
    sensor_h: u32,
) -> (f64, f64) {
    let w = sensor_w as f64;
    let h = sensor_h as f64;
    match orientation {
        Orientation::Rotate0 => (u, v),
        Orientation::Rotate90 => (v, h - u),
        Orientation::Rotate180 => (w - u, h - v),
        Orientation::Rotate270 => (w - v, u),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Letterbox {
    scale: f64,
    pad_x: u32,
    pad_y: u32,
}

impl Letterbox {
    fn to_image(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.pad_x as f64) / self.scale,
            (y - self.pad_y as f64) / self.scale,
        )
    }
}

/// Scale to fit `target_size` keeping aspect ratio, pad with black.
fn letterbox(
    image: &RgbImage,
    target_size: u32,
    layout: TensorLayout,
) -> (ndarray::Array4<f32>, Letterbox) {
    let fw = image.width() as f64;
    let fh = image.height() as f64;
    let target = target_size as f64;

    let scale = (target / fw).min(target / fh);
    let new_w = ((fw * scale).round() as u32).min(target_size);
    let new_h = ((fh * scale).round() as u32).min(target_size);
    let pad_x = (target_size - new_w) / 2;
    let pad_y = (target_size - new_h) / 2;

    let s = target_size as usize;
    let mut tensor = match layout {
        TensorLayout::Nhwc => ndarray::Array4::<f32>::zeros((1, s, s, 3)),
        TensorLayout::Nchw => ndarray::Array4::<f32>::zeros((1, 3, s, s)),
    };

    let src_w = image.width();
    let src_h = image.height();

    // Nearest-neighbor resize into the padded region
    for y in 0..new_h {
        let src_y = ((y as f64 / scale) as u32).min(src_h - 1);
        for x in 0..new_w {
            let src_x = ((x as f64 / scale) as u32).min(src_w - 1);
            let px = image.get_pixel(src_x, src_y);
            let ty = (pad_y + y) as usize;
            let tx = (pad_x + x) as usize;
            for c in 0..3 {
                let v = px.0[c] as f32 / 255.0;
                match layout {
                    TensorLayout::Nhwc => tensor[[0, ty, tx, c]] = v,
                    TensorLayout::Nchw => tensor[[0, c, ty, tx]] = v,
                }
            }
        }
    }

    (
        tensor,
        Letterbox {
            scale,
            pad_x,
            pad_y,
        },
    )
}

// ---------------------------------------------------------------------------
// Postprocessing
// ---------------------------------------------------------------------------

/// Decodes the landmark tensor into the 33 body landmarks.
///
/// Extra auxiliary landmarks some model variants append are ignored. Depth
/// shares the x axis scale, so it is divided by the letterbox scale too.
fn decode_landmarks(values: &[f32], letterbox: &Letterbox) -> Result<RawPose, String> {
    let needed = LANDMARK_COUNT * VALUES_PER_LANDMARK;
    if values.len() < needed {
        return Err(format!(
            "pose model returned {} landmark values, expected at least {}",
            values.len(),
            needed
        ));
    }

    let landmarks = LandmarkType::ALL
        .iter()
        .zip(values.chunks_exact(VALUES_PER_LANDMARK))
        .map(|(&landmark_type, v)| {
            let (x, y) = letterbox.to_image(v[0] as f64, v[1] as f64);
            let z = v[2] as f64 / letterbox.scale;
            RawLandmark::new(landmark_type, (x, y), z).with_visibility(sigmoid(v[3]) as f64)
        })
        .collect();

    Ok(RawPose::new(landmarks))
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Rgb;
    use rstest::rstest;

    #[test]
    fn test_input_geometry_nhwc() {
        assert_eq!(
            input_geometry(&[1, 256, 256, 3]),
            Some((256, TensorLayout::Nhwc))
        );
    }

    #[test]
    fn test_input_geometry_nchw() {
        assert_eq!(
            input_geometry(&[1, 3, 224, 224]),
            Some((224, TensorLayout::Nchw))
        );
    }

    #[test]
    fn test_input_geometry_dynamic_is_none() {
        assert_eq!(input_geometry(&[-1, -1, -1, 3]), None);
        assert_eq!(input_geometry(&[1, 195]), None);
    }

    #[test]
    fn test_letterbox_preserves_aspect_ratio() {
        // 200x100 image into 256x256
        let image = RgbImage::new(200, 100);
        let (tensor, lb) = letterbox(&image, 256, TensorLayout::Nhwc);
        assert_eq!(tensor.shape(), &[1, 256, 256, 3]);
        assert_relative_eq!(lb.scale, 1.28);
        assert_eq!(lb.pad_x, 0);
        assert_eq!(lb.pad_y, 64);
    }

    #[test]
    fn test_letterbox_values_normalized_and_padding_black() {
        let image = RgbImage::from_pixel(200, 100, Rgb([255, 0, 51]));
        let (tensor, lb) = letterbox(&image, 256, TensorLayout::Nchw);
        assert_eq!(tensor.shape(), &[1, 3, 256, 256]);
        let cy = lb.pad_y as usize + 10;
        assert_relative_eq!(tensor[[0, 0, cy, 10]], 1.0);
        assert_relative_eq!(tensor[[0, 1, cy, 10]], 0.0);
        assert_relative_eq!(tensor[[0, 2, cy, 10]], 0.2);
        assert_relative_eq!(tensor[[0, 0, 0, 0]], 0.0);
    }

    #[test]
    fn test_letterbox_to_image_inverts_mapping() {
        let lb = Letterbox {
            scale: 0.5,
            pad_x: 0,
            pad_y: 32,
        };
        assert_eq!(lb.to_image(50.0, 82.0), (100.0, 100.0));
    }

    #[test]
    fn test_decode_rejects_short_tensor() {
        let lb = Letterbox {
            scale: 1.0,
            pad_x: 0,
            pad_y: 0,
        };
        assert!(decode_landmarks(&[0.0; 10], &lb).is_err());
    }

    #[test]
    fn test_decode_maps_landmarks_in_order() {
        let lb = Letterbox {
            scale: 2.0,
            pad_x: 4,
            pad_y: 0,
        };
        // 39 landmarks as emitted by the full model; the tail is auxiliary.
        let mut values = vec![0.0f32; 39 * VALUES_PER_LANDMARK];
        values[0] = 24.0; // nose x
        values[1] = 10.0; // nose y
        values[2] = -6.0; // nose z
        values[3] = 0.0; // nose visibility logit
        let pose = decode_landmarks(&values, &lb).unwrap();

        assert_eq!(pose.len(), LANDMARK_COUNT);
        let nose = &pose.landmarks()[0];
        assert_eq!(nose.landmark_type, LandmarkType::Nose);
        assert_relative_eq!(nose.position.0, 10.0);
        assert_relative_eq!(nose.position.1, 5.0);
        assert_relative_eq!(nose.depth(), -3.0);
        assert_relative_eq!(nose.visibility.unwrap(), 0.5);
        assert_eq!(pose.landmarks()[32].landmark_type, LandmarkType::RightFootIndex);
    }

    #[rstest]
    #[case::r0(Orientation::Rotate0, 200, 100)]
    #[case::r90(Orientation::Rotate90, 100, 200)]
    #[case::r180(Orientation::Rotate180, 200, 100)]
    #[case::r270(Orientation::Rotate270, 100, 200)]
    fn test_upright_extent(#[case] orientation: Orientation, #[case] w: u32, #[case] h: u32) {
        let image = upright(&RgbImage::new(200, 100), orientation);
        assert_eq!(image.dimensions(), (w, h));
    }

    #[rstest]
    #[case::r0(Orientation::Rotate0)]
    #[case::r90(Orientation::Rotate90)]
    #[case::r180(Orientation::Rotate180)]
    #[case::r270(Orientation::Rotate270)]
    fn test_to_sensor_follows_pixel_rotation(#[case] orientation: Orientation) {
        // Mark a single sensor pixel and find where it lands after rotation.
        let (w, h) = (8u32, 6u32);
        let mut sensor = RgbImage::new(w, h);
        sensor.put_pixel(2, 1, Rgb([255, 255, 255]));
        let rotated = upright(&sensor, orientation);
        let (u, v) = rotated
            .enumerate_pixels()
            .find(|(_, _, p)| p.0[0] == 255)
            .map(|(x, y, _)| (x, y))
            .unwrap();

        // Compare pixel centres.
        let (sx, sy) = to_sensor((u as f64 + 0.5, v as f64 + 0.5), orientation, w, h);
        assert_relative_eq!(sx, 2.5);
        assert_relative_eq!(sy, 1.5);
    }

    #[test]
    fn test_sigmoid() {
        assert_relative_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(10.0) > 0.99);
        assert!(sigmoid(-10.0) < 0.01);
    }
}
