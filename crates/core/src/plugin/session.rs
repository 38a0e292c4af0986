use super::handle::{LinkingError, PoseDetectorHandle};
use super::options::PluginOptions;
use super::registry::PluginRegistry;

/// Keeps one pose handle alive for a camera session.
///
/// Asking again with equal options hands back the existing handle. New
/// options release the old plugin first. Ending or dropping the session
/// releases whatever is held.
pub struct PoseDetectorSession<'r> {
    registry: &'r PluginRegistry,
    current: Option<PoseDetectorHandle>,
}

impl<'r> PoseDetectorSession<'r> {
    pub fn new(registry: &'r PluginRegistry) -> Self {
        Self {
            registry,
            current: None,
        }
    }

    pub fn handle(
        &mut self,
        options: PluginOptions,
    ) -> Result<&mut PoseDetectorHandle, LinkingError> {
        if self
            .current
            .as_ref()
            .is_some_and(|handle| handle.options() != options)
        {
            log::debug!("Pose detector options changed, recreating handle");
            self.end();
        }

        let handle = match self.current.take() {
            Some(handle) => handle,
            None => PoseDetectorHandle::create_in(self.registry, options)?,
        };
        Ok(self.current.insert(handle))
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn end(&mut self) {
        if let Some(mut handle) = self.current.take() {
            handle.release();
        }
    }
}

impl Drop for PoseDetectorSession<'_> {
    fn drop(&mut self) {
        self.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::result_marshaller::PoseResult;
    use crate::plugin::frame_processor_plugin::FrameProcessorPlugin;
    use crate::plugin::registry::PluginResult;
    use crate::shared::constants::PLUGIN_NAME;
    use crate::shared::frame::Frame;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct TrackedPlugin {
        released: Arc<AtomicUsize>,
    }

    impl FrameProcessorPlugin for TrackedPlugin {
        fn callback(&mut self, _frame: &Frame) -> PoseResult {
            PoseResult::empty()
        }

        fn release(&mut self) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Counters {
        created: Arc<AtomicUsize>,
        released: Arc<AtomicUsize>,
    }

    fn registry_with_tracking() -> (PluginRegistry, Counters) {
        let created = Arc::new(AtomicUsize::new(0));
        let released = Arc::new(AtomicUsize::new(0));
        let registry = PluginRegistry::new();
        let (c, r) = (created.clone(), released.clone());
        registry
            .register(
                PLUGIN_NAME,
                Box::new(move |_: &PluginOptions| -> PluginResult {
                    c.fetch_add(1, Ordering::SeqCst);
                    Ok(Box::new(TrackedPlugin {
                        released: r.clone(),
                    }))
                }),
            )
            .unwrap();
        (registry, Counters { created, released })
    }

    #[test]
    fn test_same_options_reuse_handle() {
        let (registry, counters) = registry_with_tracking();
        let mut session = PoseDetectorSession::new(&registry);
        session.handle(PluginOptions::default()).unwrap();
        session.handle(PluginOptions::default()).unwrap();
        assert_eq!(counters.created.load(Ordering::SeqCst), 1);
        assert_eq!(counters.released.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_changed_options_release_and_recreate() {
        let (registry, counters) = registry_with_tracking();
        let mut session = PoseDetectorSession::new(&registry);
        session.handle(PluginOptions::new(false)).unwrap();
        let handle = session.handle(PluginOptions::new(true)).unwrap();
        assert!(handle.options().invert_colors);
        assert_eq!(counters.created.load(Ordering::SeqCst), 2);
        assert_eq!(counters.released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_releases_plugin() {
        let (registry, counters) = registry_with_tracking();
        {
            let mut session = PoseDetectorSession::new(&registry);
            session.handle(PluginOptions::default()).unwrap();
            assert!(session.is_active());
        }
        assert_eq!(counters.released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_end_is_idempotent() {
        let (registry, counters) = registry_with_tracking();
        let mut session = PoseDetectorSession::new(&registry);
        session.handle(PluginOptions::default()).unwrap();
        session.end();
        session.end();
        assert!(!session.is_active());
        drop(session);
        assert_eq!(counters.released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_plugin_is_linking_error() {
        let registry = PluginRegistry::new();
        let mut session = PoseDetectorSession::new(&registry);
        assert!(matches!(
            session.handle(PluginOptions::default()),
            Err(LinkingError::NotRegistered { .. })
        ));
        assert!(!session.is_active());
    }
}
