use super::model_image::ModelImage;
use super::raw_pose::RawPose;

/// How the detector client treats consecutive images. Plugin instances
/// always ask for continuous camera frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectorMode {
    Stream,
}

/// Domain interface for the external pose-estimation model.
///
/// `process` blocks until the model answers. Exclusive access through
/// `&mut self` keeps a single submission outstanding per client.
pub trait PoseDetectorClient: Send {
    fn process(&mut self, image: &ModelImage) -> Result<RawPose, Box<dyn std::error::Error>>;
}

pub type ClientResult = Result<Box<dyn PoseDetectorClient>, Box<dyn std::error::Error>>;

/// Builds one detector client for a plugin instance.
pub type ClientFactory = Box<dyn Fn(DetectorMode) -> ClientResult + Send + Sync>;
