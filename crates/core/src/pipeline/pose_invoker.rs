use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crate::detection::domain::model_image::ModelImage;
use crate::detection::domain::pose_detector_client::PoseDetectorClient;
use crate::detection::domain::raw_pose::RawPose;

use super::pose_detection_error::PoseDetectionError;

/// Owns the plugin instance's detector client and submits one image at a time.
///
/// `invoke` blocks the calling frame thread until the client answers. There
/// is no queue: while an inference runs the host keeps dropping frames.
pub struct PoseInvoker {
    client: Box<dyn PoseDetectorClient>,
}

impl PoseInvoker {
    pub fn new(client: Box<dyn PoseDetectorClient>) -> Self {
        Self { client }
    }

    pub fn invoke(&mut self, image: &ModelImage) -> Result<RawPose, PoseDetectionError> {
        let started = Instant::now();
        let client = &mut self.client;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| client.process(image)));

        match outcome {
            Ok(Ok(pose)) => {
                log::debug!(
                    "Pose inference on {}x{} image took {:.1}ms ({} landmarks)",
                    image.width(),
                    image.height(),
                    started.elapsed().as_secs_f64() * 1000.0,
                    pose.len()
                );
                Ok(pose)
            }
            Ok(Err(e)) => Err(PoseDetectionError::Inference(e.to_string())),
            Err(payload) => Err(PoseDetectionError::unexpected(
                "pose invoker",
                format!("detector panicked: {}", panic_message(payload.as_ref())),
            )),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}
