use image::RgbImage;

use crate::shared::orientation::Orientation;

/// A frame converted into the RGB form the detector consumes.
///
/// Keeps the source frame's sensor-space extent and orientation metadata;
/// pixels are never rotated here.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelImage {
    image: RgbImage,
    orientation: Orientation,
    is_mirrored: bool,
}

impl ModelImage {
    pub fn new(image: RgbImage, orientation: Orientation, is_mirrored: bool) -> Self {
        Self {
            image,
            orientation,
            is_mirrored,
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_mirrored(&self) -> bool {
        self.is_mirrored
    }
}
