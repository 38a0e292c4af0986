//! Sensor-space to display-space mapping for landmark positions.
//!
//! Rotation is clockwise in image coordinates (y grows downwards). After the
//! quarter-turn rotation about the origin the point is translated back into
//! the positive quadrant of the rotated frame, so display coordinates always
//! lie in `[0, display_width] x [0, display_height]` for in-frame input.
//! Mirroring reflects the horizontal display axis afterwards.

use crate::shared::orientation::Orientation;

use super::raw_pose::RawLandmark;

/// A landmark position in display space. Depth is passed through untouched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkTransformer {
    sensor_width: f64,
    sensor_height: f64,
    display_width: f64,
    display_height: f64,
    orientation: Orientation,
    is_mirrored: bool,
}

impl LandmarkTransformer {
    pub fn new(
        sensor_width: u32,
        sensor_height: u32,
        orientation: Orientation,
        is_mirrored: bool,
    ) -> Self {
        let (display_width, display_height) =
            orientation.display_extent(sensor_width, sensor_height);
        Self {
            sensor_width: sensor_width as f64,
            sensor_height: sensor_height as f64,
            display_width: display_width as f64,
            display_height: display_height as f64,
            orientation,
            is_mirrored,
        }
    }

    /// Extent of the display space the transformer maps into.
    pub fn display_extent(&self) -> (f64, f64) {
        (self.display_width, self.display_height)
    }

    pub fn transform_point(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let w = self.sensor_width;
        let h = self.sensor_height;
        let (rx, ry) = match self.orientation {
            Orientation::Rotate0 => (x, y),
            // R(90) = [[0, -1], [1, 0]] then translate by (h, 0)
            Orientation::Rotate90 => (h - y, x),
            // R(180) = [[-1, 0], [0, -1]] then translate by (w, h)
            Orientation::Rotate180 => (w - x, h - y),
            // R(270) = [[0, 1], [-1, 0]] then translate by (0, w)
            Orientation::Rotate270 => (y, w - x),
        };

        if self.is_mirrored {
            (self.display_width - rx, ry)
        } else {
            (rx, ry)
        }
    }

    pub fn transform(&self, landmark: &RawLandmark) -> DisplayPosition {
        let (x, y) = self.transform_point(landmark.position);
        DisplayPosition {
            x,
            y,
            z: landmark.depth(),
        }
    }
}
