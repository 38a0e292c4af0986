//! Process-wide table of frame processor plugins, keyed by name.
//!
//! The registry stores initializers rather than plugin instances: every
//! handle gets its own plugin (and with it its own detector client).

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use thiserror::Error;

use super::frame_processor_plugin::FrameProcessorPlugin;
use super::options::PluginOptions;

pub type PluginResult = Result<Box<dyn FrameProcessorPlugin>, Box<dyn std::error::Error>>;

/// Builds one plugin instance for the given construction options.
pub type PluginInitializer = Box<dyn Fn(&PluginOptions) -> PluginResult + Send + Sync>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("plugin '{0}' is already registered")]
    AlreadyRegistered(String),
    #[error("plugin '{0}' is not registered")]
    NotRegistered(String),
}

#[derive(Default)]
pub struct PluginRegistry {
    initializers: RwLock<HashMap<String, Arc<PluginInitializer>>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by the whole process.
    pub fn global() -> &'static PluginRegistry {
        static GLOBAL: OnceLock<PluginRegistry> = OnceLock::new();
        GLOBAL.get_or_init(PluginRegistry::new)
    }

    pub fn register(
        &self,
        name: impl Into<String>,
        initializer: PluginInitializer,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut initializers = self
            .initializers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if initializers.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered(name));
        }
        log::info!("Registering frame processor plugin: {}", name);
        initializers.insert(name, Arc::new(initializer));
        Ok(())
    }

    pub fn unregister(&self, name: &str) -> Result<(), RegistryError> {
        let removed = self
            .initializers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
        match removed {
            Some(_) => {
                log::info!("Unregistered frame processor plugin: {}", name);
                Ok(())
            }
            None => Err(RegistryError::NotRegistered(name.to_string())),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<PluginInitializer>> {
        self.initializers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.initializers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }
}
