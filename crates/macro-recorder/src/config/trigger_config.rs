use crate::config::{default_play_key, default_start_key, default_stop_key};

use macro_recorder_core::{TriggerBindings, TriggerKey, TriggerRole};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Trigger key configuration, stored as key labels (`"F6"`, `"~"`, `"Ctrl"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Key toggling recording.
    #[serde(default = "default_start_key")]
    pub start: TriggerKey,
    /// Key starting playback.
    #[serde(default = "default_play_key")]
    pub play: TriggerKey,
    /// Key stopping everything.
    #[serde(default = "default_stop_key")]
    pub stop: TriggerKey,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self::from(&TriggerBindings::default())
    }
}

impl TriggerConfig {
    /// Validated bindings; colliding keys fall back to the defaults.
    pub fn bindings(&self) -> TriggerBindings {
        TriggerBindings::new(self.start, self.play, self.stop).unwrap_or_else(|e| {
            warn!(error = %e, "Trigger keys collide, using defaults");
            TriggerBindings::default()
        })
    }
}

impl From<&TriggerBindings> for TriggerConfig {
    fn from(bindings: &TriggerBindings) -> Self {
        Self {
            start: bindings.key(TriggerRole::Start),
            play: bindings.key(TriggerRole::Play),
            stop: bindings.key(TriggerRole::Stop),
        }
    }
}
