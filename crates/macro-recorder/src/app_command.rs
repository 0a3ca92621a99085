use macro_recorder_core::{PlaybackExit, TriggerRole};

/// Commands sent to the main application from the hotkey handler and the
/// playback thread.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// A trigger key was pressed.
    Trigger {
        /// Role bound to the pressed key.
        role: TriggerRole,
    },
    /// The playback thread ended.
    PlaybackFinished(PlaybackExit),
    /// Request application shutdown.
    Shutdown,
}
