use ort::execution_providers::ExecutionProviderDispatch;

/// Hardware backend the pose model runs on for this target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoseBackend {
    CoreMl,
    DirectMl,
    Cpu,
}

impl PoseBackend {
    /// Backend compiled in for the current operating system.
    pub fn current() -> Self {
        #[cfg(target_os = "macos")]
        {
            PoseBackend::CoreMl
        }
        #[cfg(target_os = "windows")]
        {
            PoseBackend::DirectMl
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            PoseBackend::Cpu
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PoseBackend::CoreMl => "onnx-coreml",
            PoseBackend::DirectMl => "onnx-directml",
            PoseBackend::Cpu => "onnx-cpu",
        }
    }
}

/// Execution providers for the pose session. ONNX Runtime falls back to
/// CPU when the listed provider can't be initialized.
pub fn preferred_execution_providers() -> Vec<ExecutionProviderDispatch> {
    #[cfg(target_os = "macos")]
    {
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        vec![]
    }
}
