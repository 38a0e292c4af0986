use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Construction options for a pose plugin instance. Fixed for the
/// instance's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginOptions {
    pub invert_colors: bool,
}

impl PluginOptions {
    pub fn new(invert_colors: bool) -> Self {
        Self { invert_colors }
    }

    /// Reads options from a loosely typed option map.
    ///
    /// Unknown keys are ignored; `invertColors` only counts when it is a
    /// JSON boolean, anything else falls back to `false`.
    pub fn from_value(options: &Value) -> Self {
        let invert_colors = options
            .get("invertColors")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Self { invert_colors }
    }
}
