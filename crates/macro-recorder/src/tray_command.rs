use crate::TrayIconState;

use macro_recorder_core::{CycleDelay, TriggerBindings};

/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns `TrayManager` (because `TrayIcon` is `!Send`) and
/// the hotkey registry, so all tray mutations, hotkey re-registration and
/// process lifecycle events flow through this enum.
#[derive(Debug, Clone)]
pub enum TrayCommand {
    /// Update the tray icon and status text.
    SetStatus {
        /// Icon to show.
        state: TrayIconState,
        /// Status text for the tooltip.
        text: String,
        /// Latest recorded action descriptions, oldest first.
        recent: Vec<String>,
    },
    /// Re-register hotkeys and rebuild the menu for new settings.
    Reconfigure {
        /// Current trigger keys.
        bindings: TriggerBindings,
        /// Current pause between passes.
        cycle_delay: CycleDelay,
    },
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
