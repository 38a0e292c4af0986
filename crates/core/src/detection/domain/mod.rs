pub mod landmark_transformer;
pub mod landmark_type;
pub mod model_image;
pub mod pose_detector_client;
pub mod raw_pose;
