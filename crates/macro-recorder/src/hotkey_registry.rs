//! Global hotkey registration for the three trigger keys.
//!
//! Lives on the main thread next to the `tao` event loop, which pumps the
//! platform messages hotkey delivery depends on.

use crate::{AppError, AppResult, trigger_hotkey};

use std::panic::Location;

use error_location::ErrorLocation;
use global_hotkey::{GlobalHotKeyManager, hotkey::HotKey};
use macro_recorder_core::TriggerBindings;
use tracing::{error, info, instrument, warn};

/// Owns the hotkey manager and the currently registered trigger keys.
///
/// Dropping it unregisters every trigger key.
pub struct HotkeyRegistry {
    manager: GlobalHotKeyManager,
    registered: Vec<HotKey>,
}

impl HotkeyRegistry {
    /// Create the platform hotkey manager.
    ///
    /// Must be called on a thread with a message pump (e.g. the main thread
    /// running a `tao` event loop) so that `WM_HOTKEY` messages are
    /// dispatched on Windows.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to create manager: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            manager,
            registered: Vec::new(),
        })
    }

    /// Replace the registered keys with one hotkey per role.
    ///
    /// Previously registered keys are released first. A key the platform
    /// refuses does not prevent the others from being registered.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::HotkeyRegistrationFailed`] naming every key that
    /// could not be registered.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn register(&mut self, bindings: &TriggerBindings) -> AppResult<()> {
        if !self.registered.is_empty() {
            if let Err(e) = self.manager.unregister_all(&self.registered) {
                warn!(error = %e, "Failed to unregister previous trigger keys");
            }
            self.registered.clear();
        }

        let mut failures = Vec::new();

        for (role, key) in bindings.pairs() {
            let hotkey = trigger_hotkey(key);
            match self.manager.register(hotkey) {
                Ok(()) => {
                    info!(role = %role, key = %key, "Trigger key registered");
                    self.registered.push(hotkey);
                }
                Err(e) => {
                    error!(role = %role, key = %key, error = %e, "Failed to register trigger key");
                    failures.push(format!("{} for {}: {}", key, role, e));
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(AppError::HotkeyRegistrationFailed {
                reason: failures.join("; "),
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}
