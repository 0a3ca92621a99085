//! Global hotkey handler for the trigger keys.
//!
//! Listens on the global hotkey event channel, resolves each press to the
//! role currently bound to that key and forwards it to the application.

use crate::{AppCommand, AppError, AppResult};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use global_hotkey::{
    GlobalHotKeyEvent, HotKeyState,
    hotkey::{Code, HotKey},
};
use macro_recorder_core::{TriggerBindings, TriggerKey, TriggerRole};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Hotkey for a trigger key. Trigger keys are registered without modifiers.
pub fn trigger_hotkey(key: TriggerKey) -> HotKey {
    let code = match key {
        TriggerKey::F1 => Code::F1,
        TriggerKey::F2 => Code::F2,
        TriggerKey::F3 => Code::F3,
        TriggerKey::F4 => Code::F4,
        TriggerKey::F5 => Code::F5,
        TriggerKey::F6 => Code::F6,
        TriggerKey::F7 => Code::F7,
        TriggerKey::F8 => Code::F8,
        TriggerKey::F9 => Code::F9,
        TriggerKey::F10 => Code::F10,
        TriggerKey::F11 => Code::F11,
        TriggerKey::F12 => Code::F12,
        TriggerKey::Ctrl => Code::ControlLeft,
        TriggerKey::Alt => Code::AltLeft,
        TriggerKey::Shift => Code::ShiftLeft,
        TriggerKey::Tilde => Code::Backquote,
    };

    HotKey::new(None, code)
}

/// Role whose key produced the hotkey event `id`.
pub fn role_for_hotkey(id: u32, bindings: &TriggerBindings) -> Option<TriggerRole> {
    bindings
        .pairs()
        .into_iter()
        .find(|(_, key)| trigger_hotkey(*key).id() == id)
        .map(|(role, _)| role)
}

/// Forwards trigger key presses to the application.
pub struct HotkeyHandler {
    bindings_rx: watch::Receiver<TriggerBindings>,
    command_tx: mpsc::Sender<AppCommand>,
}

impl HotkeyHandler {
    /// Create a handler that follows the bindings published on `bindings_rx`.
    ///
    /// This struct is `Send` and can live on any thread; it only listens on
    /// the global [`GlobalHotKeyEvent`] channel.
    pub fn new(
        bindings_rx: watch::Receiver<TriggerBindings>,
        command_tx: mpsc::Sender<AppCommand>,
    ) -> Self {
        Self {
            bindings_rx,
            command_tx,
        }
    }

    /// Run the hotkey handler event loop.
    ///
    /// This method blocks until a shutdown signal is received.
    #[instrument(skip(self))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let receiver = GlobalHotKeyEvent::receiver().clone();
        let (event_tx, mut event_rx) = mpsc::channel(32);

        // Single persistent blocking task that forwards hotkey events.
        // GlobalHotKeyEvent::receiver() returns a crossbeam_channel::Receiver
        // which has blocking recv().
        //
        // Shutdown: when event_rx is dropped (loop breaks), the next
        // event_tx.blocking_send() fails, breaking the blocking loop.
        let handle = tokio::task::spawn_blocking(move || {
            while let Ok(event) = receiver.recv() {
                if event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Hotkey handler shutting down");
                    break;
                }
                Some(event) = event_rx.recv() => {
                    if let Err(e) = self.handle_hotkey(event.id, event.state).await {
                        warn!(error = ?e, "Failed to forward trigger key");
                    }
                }
            }
        }

        drop(event_rx);

        // The blocking task may be stuck in recv() if no hotkey event
        // arrives after shutdown; it is cleaned up on process exit.
        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Hotkey event forwarder stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Hotkey event forwarder task panicked"),
            Err(_) => debug!(
                "Hotkey event forwarder did not stop within timeout, \
                   will be cleaned up on exit"
            ),
        }

        Ok(())
    }

    /// Forward a key-down of a bound trigger key. Releases and unbound ids
    /// are ignored.
    #[instrument(skip(self))]
    pub(crate) async fn handle_hotkey(&self, id: u32, state: HotKeyState) -> AppResult<()> {
        if state != HotKeyState::Pressed {
            return Ok(());
        }

        let role = role_for_hotkey(id, &self.bindings_rx.borrow());
        let Some(role) = role else {
            debug!(id, "Hotkey is not a current trigger key");
            return Ok(());
        };

        self.command_tx
            .send(AppCommand::Trigger { role })
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send Trigger({}): {}", role, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(role = %role, "Trigger key pressed");

        Ok(())
    }
}
