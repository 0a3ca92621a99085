#[allow(clippy::module_inception)]
mod config;
mod playback_config;
mod trigger_config;

pub(crate) use {
    config::Config, playback_config::PlaybackConfig, trigger_config::TriggerConfig,
};

use macro_recorder_core::{TriggerKey, TriggerRole};

pub(crate) fn default_start_key() -> TriggerKey {
    default_key(TriggerRole::Start)
}

pub(crate) fn default_play_key() -> TriggerKey {
    default_key(TriggerRole::Play)
}

pub(crate) fn default_stop_key() -> TriggerKey {
    default_key(TriggerRole::Stop)
}

fn default_key(role: TriggerRole) -> TriggerKey {
    macro_recorder_core::TriggerBindings::default().key(role)
}
