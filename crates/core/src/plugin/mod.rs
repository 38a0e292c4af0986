pub mod frame_processor_plugin;
pub mod handle;
pub mod options;
pub mod platform;
pub mod registry;
pub mod session;
