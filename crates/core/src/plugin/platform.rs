use std::path::{Path, PathBuf};

use crate::detection::domain::pose_detector_client::{ClientFactory, ClientResult, DetectorMode};
use crate::detection::infrastructure::execution_provider::PoseBackend;
use crate::detection::infrastructure::onnx_blazepose_detector::{
    OnnxBlazeposeDetector, DEFAULT_PRESENCE_THRESHOLD,
};
use crate::pipeline::pose_detection_plugin::pose_plugin_initializer;
use crate::shared::constants::PLUGIN_NAME;

use super::registry::{PluginRegistry, RegistryError};

/// Name of the native variant compiled for this target.
pub fn platform_name() -> &'static str {
    PoseBackend::current().name()
}

/// Registers the ONNX-backed pose plugin under `"poseDetector"`.
///
/// The model is only loaded when a handle is created, once per plugin
/// instance.
pub fn register_platform_plugin(
    registry: &PluginRegistry,
    model_path: &Path,
) -> Result<(), RegistryError> {
    let model_path: PathBuf = model_path.to_path_buf();
    let factory: ClientFactory = Box::new(move |mode: DetectorMode| -> ClientResult {
        let detector = OnnxBlazeposeDetector::new(&model_path, mode, DEFAULT_PRESENCE_THRESHOLD)?;
        Ok(Box::new(detector))
    });
    registry.register(PLUGIN_NAME, pose_plugin_initializer(factory))?;
    log::info!("Registered {} pose plugin ({})", platform_name(), PLUGIN_NAME);
    Ok(())
}
