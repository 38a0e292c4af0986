//! Bridge from host camera frames to a pose landmark detector.
//!
//! A host registers a frame processor plugin under `"poseDetector"`, creates
//! a [`PoseDetectorHandle`] and calls [`PoseDetectorHandle::detect_pose`] for
//! every frame. Each call yields display-space landmark records or, when
//! anything goes wrong for that frame, an empty result.

pub mod detection;
pub mod pipeline;
pub mod plugin;
pub mod shared;

pub use pipeline::result_marshaller::{LandmarkRecord, PoseResult};
pub use plugin::handle::{LinkingError, PoseDetectorHandle};
pub use plugin::options::PluginOptions;
pub use plugin::registry::PluginRegistry;
pub use plugin::session::PoseDetectorSession;
pub use shared::frame::{Frame, PixelFormat};
pub use shared::orientation::Orientation;
