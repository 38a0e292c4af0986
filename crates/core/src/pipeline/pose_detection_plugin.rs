use crate::detection::domain::landmark_transformer::LandmarkTransformer;
use crate::detection::domain::pose_detector_client::{
    ClientFactory, DetectorMode, PoseDetectorClient,
};
use crate::plugin::frame_processor_plugin::FrameProcessorPlugin;
use crate::plugin::options::PluginOptions;
use crate::plugin::registry::{PluginInitializer, PluginResult};
use crate::shared::frame::Frame;

use super::frame_adapter::FrameAdapter;
use super::pose_detection_error::PoseDetectionError;
use super::pose_invoker::PoseInvoker;
use super::result_marshaller::{self, PoseResult};

/// Result of one callback before it crosses the plugin boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackOutcome {
    Detected(PoseResult),
    Degraded(PoseDetectionError),
}

impl CallbackOutcome {
    pub fn into_result(self) -> PoseResult {
        match self {
            Self::Detected(result) => result,
            Self::Degraded(_) => PoseResult::empty(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginState {
    Ready,
    Released,
}

/// Frame → adapter → invoker → transformer → marshaller, for one plugin
/// instance with fixed options.
pub struct PoseDetectionPlugin {
    adapter: FrameAdapter,
    invoker: Option<PoseInvoker>,
    options: PluginOptions,
}

impl PoseDetectionPlugin {
    pub fn new(options: PluginOptions, client: Box<dyn PoseDetectorClient>) -> Self {
        Self {
            adapter: FrameAdapter::new(options.invert_colors),
            invoker: Some(PoseInvoker::new(client)),
            options,
        }
    }

    pub fn options(&self) -> PluginOptions {
        self.options
    }

    pub fn state(&self) -> PluginState {
        if self.invoker.is_some() {
            PluginState::Ready
        } else {
            PluginState::Released
        }
    }

    pub fn process(&mut self, frame: &Frame) -> CallbackOutcome {
        match self.detect(frame) {
            Ok(result) => CallbackOutcome::Detected(result),
            Err(e) => CallbackOutcome::Degraded(e),
        }
    }

    fn detect(&mut self, frame: &Frame) -> Result<PoseResult, PoseDetectionError> {
        let invoker = self
            .invoker
            .as_mut()
            .ok_or_else(|| PoseDetectionError::unexpected("plugin", "plugin was released"))?;

        let image = self.adapter.adapt(frame)?;
        let pose = invoker.invoke(&image)?;

        let transformer = LandmarkTransformer::new(
            frame.width(),
            frame.height(),
            frame.orientation(),
            frame.is_mirrored(),
        );
        Ok(result_marshaller::marshal(
            frame.timestamp(),
            pose.landmarks().iter().map(|lm| (lm, transformer.transform(lm))),
        ))
    }
}

impl FrameProcessorPlugin for PoseDetectionPlugin {
    fn callback(&mut self, frame: &Frame) -> PoseResult {
        let outcome = self.process(frame);
        if let CallbackOutcome::Degraded(e) = &outcome {
            log::error!(
                "Pose detection degraded to empty result in {}: {}",
                e.component(),
                e
            );
        }
        outcome.into_result()
    }

    fn release(&mut self) {
        if self.invoker.take().is_some() {
            log::debug!("Pose detection plugin released");
        }
    }
}

/// Wraps a detector client factory into a registry initializer. Every
/// plugin instance gets its own streaming-mode client.
pub fn pose_plugin_initializer(factory: ClientFactory) -> PluginInitializer {
    Box::new(move |options: &PluginOptions| -> PluginResult {
        let client = factory(DetectorMode::Stream)?;
        log::info!(
            "Created pose detection plugin (invertColors: {})",
            options.invert_colors
        );
        Ok(Box::new(PoseDetectionPlugin::new(*options, client)))
    })
}
