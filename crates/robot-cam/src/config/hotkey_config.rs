use crate::config::{default_start_hotkey, default_stop_hotkey};

use serde::{Deserialize, Serialize};

/// Manual recording hotkeys, in `global-hotkey` syntax (e.g. `ctrl+KeyN`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Hotkey that starts a recording.
    #[serde(default = "default_start_hotkey")]
    pub start: String,

    /// Hotkey that stops the current recording.
    #[serde(default = "default_stop_hotkey")]
    pub stop: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            start: default_start_hotkey(),
            stop: default_stop_hotkey(),
        }
    }
}
