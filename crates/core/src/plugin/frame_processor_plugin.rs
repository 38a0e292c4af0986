use crate::pipeline::result_marshaller::PoseResult;
use crate::shared::frame::Frame;

/// A native frame processor the host calls once per camera frame.
///
/// `callback` never fails: per-frame problems degrade to an empty result.
pub trait FrameProcessorPlugin: Send {
    fn callback(&mut self, frame: &Frame) -> PoseResult;

    /// Tears down whatever the plugin holds. Later callbacks return empty.
    fn release(&mut self) {}
}
