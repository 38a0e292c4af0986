use super::landmark_type::LandmarkType;

/// One landmark as reported by the detector, still in sensor space.
#[derive(Clone, Debug, PartialEq)]
pub struct RawLandmark {
    pub landmark_type: LandmarkType,
    /// Sensor-space pixel position.
    pub position: (f64, f64),
    /// Same point with depth; z shares the pixel scale of x.
    pub position_3d: (f64, f64, f64),
    pub visibility: Option<f64>,
}

impl RawLandmark {
    pub fn new(landmark_type: LandmarkType, position: (f64, f64), depth: f64) -> Self {
        Self {
            landmark_type,
            position,
            position_3d: (position.0, position.1, depth),
            visibility: None,
        }
    }

    pub fn with_visibility(mut self, visibility: f64) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn depth(&self) -> f64 {
        self.position_3d.2
    }
}

/// Everything the detector found in one image, in its native landmark order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawPose {
    landmarks: Vec<RawLandmark>,
}

impl RawPose {
    pub fn new(landmarks: Vec<RawLandmark>) -> Self {
        Self { landmarks }
    }

    /// No pose in the image.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn landmarks(&self) -> &[RawLandmark] {
        &self.landmarks
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}
