/// Name the pose plugin is registered under in the plugin registry.
pub const PLUGIN_NAME: &str = "poseDetector";

pub const LINKING_ERROR: &str = "The pose detector plugin is not linked. Make sure the native \
     counterpart is registered under \"poseDetector\" before creating a handle.";

pub const POSE_MODEL_NAME: &str = "pose_landmark_full.onnx";

/// Size of the body-model landmark vocabulary.
pub const LANDMARK_COUNT: usize = 33;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
