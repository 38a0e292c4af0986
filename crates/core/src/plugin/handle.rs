use thiserror::Error;

use crate::pipeline::result_marshaller::PoseResult;
use crate::shared::constants::{LINKING_ERROR, PLUGIN_NAME};
use crate::shared::frame::Frame;

use super::frame_processor_plugin::FrameProcessorPlugin;
use super::options::PluginOptions;
use super::registry::PluginRegistry;

/// Construction-time failures. The only errors a caller ever sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkingError {
    #[error("{msg} (no plugin registered as '{name}')", msg = LINKING_ERROR)]
    NotRegistered { name: String },
    #[error("failed to initialize plugin '{name}': {cause}")]
    Initialization { name: String, cause: String },
}

/// Caller-facing handle bound to one pose plugin instance and fixed options.
pub struct PoseDetectorHandle {
    plugin: Box<dyn FrameProcessorPlugin>,
    options: PluginOptions,
}

impl PoseDetectorHandle {
    /// Resolves the pose plugin from the process-wide registry.
    pub fn create(options: PluginOptions) -> Result<Self, LinkingError> {
        Self::create_in(PluginRegistry::global(), options)
    }

    pub fn create_in(
        registry: &PluginRegistry,
        options: PluginOptions,
    ) -> Result<Self, LinkingError> {
        let initializer = registry
            .lookup(PLUGIN_NAME)
            .ok_or_else(|| LinkingError::NotRegistered {
                name: PLUGIN_NAME.to_string(),
            })?;
        let plugin = initializer(&options).map_err(|e| LinkingError::Initialization {
            name: PLUGIN_NAME.to_string(),
            cause: e.to_string(),
        })?;
        Ok(Self { plugin, options })
    }

    /// Runs the plugin on one frame. Never fails; degraded frames give `[]`.
    pub fn detect_pose(&mut self, frame: &Frame) -> PoseResult {
        self.plugin.callback(frame)
    }

    pub fn options(&self) -> PluginOptions {
        self.options
    }

    pub fn release(&mut self) {
        self.plugin.release();
    }
}
