pub mod frame_adapter;
pub mod pose_detection_error;
pub mod pose_detection_plugin;
pub mod pose_invoker;
pub mod result_marshaller;
