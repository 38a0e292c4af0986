use thiserror::Error;

use crate::shared::frame::FrameError;

/// Per-frame failures. None of these escape the plugin callback; they are
/// logged and turned into an empty result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoseDetectionError {
    #[error("frame buffer was released before processing completed")]
    FrameUnavailable,
    #[error("pose detector failed to process the image: {0}")]
    Inference(String),
    #[error("unexpected failure in {component}: {cause}")]
    Unexpected {
        component: &'static str,
        cause: String,
    },
}

impl PoseDetectionError {
    pub fn unexpected(component: &'static str, cause: impl Into<String>) -> Self {
        Self::Unexpected {
            component,
            cause: cause.into(),
        }
    }

    /// Pipeline stage the failure came from, for log context.
    pub fn component(&self) -> &'static str {
        match self {
            Self::FrameUnavailable => "frame adapter",
            Self::Inference(_) => "pose invoker",
            Self::Unexpected { component, .. } => component,
        }
    }
}

impl From<FrameError> for PoseDetectionError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::Unavailable => Self::FrameUnavailable,
            other => Self::unexpected("frame adapter", other.to_string()),
        }
    }
}
