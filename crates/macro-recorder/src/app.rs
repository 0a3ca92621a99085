use crate::{
    AppCommand, AppResult, MenuAction, RECENT_ACTIONS, TrayCommand, TrayIconState,
    config::Config,
};

use std::time::{Duration, Instant};

use macro_recorder_core::{
    CaptureMessage, CycleDelay, MacroSession, Transition, TriggerBindings, TriggerKey, TriggerRole,
};
use tao::event_loop::EventLoopProxy;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};
use tray_icon::menu::MenuEvent;

/// Main application state.
///
/// Runs on the async runtime thread and is the only owner of the
/// [`MacroSession`]. Tray updates go back to the main thread through
/// `tray_proxy` because `TrayIcon` is `!Send` and must remain on the UI
/// thread.
pub struct App {
    pub(crate) session: MacroSession,
    pub(crate) config: Config,
    pub(crate) tray_proxy: EventLoopProxy<TrayCommand>,
    pub(crate) bindings_tx: watch::Sender<TriggerBindings>,
    pub(crate) command_tx: mpsc::Sender<AppCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) capture_rx: std::sync::mpsc::Receiver<CaptureMessage>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(self) -> AppResult<()> {
        info!("Macro Recorder starting");

        let App {
            mut session,
            mut config,
            tray_proxy,
            bindings_tx,
            command_tx,
            mut command_rx,
            capture_rx,
            shutdown_tx,
        } = self;

        // Tray event forwarding via single persistent blocking task.
        //
        // MenuEvent::receiver() returns a crossbeam_channel::Receiver which
        // has blocking recv().
        //
        // Shutdown: when tray_event_rx is dropped (main loop breaks),
        // tray_event_tx.blocking_send() fails, breaking the blocking loop.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        // Capture messages arrive on a std channel from the hook thread and
        // are forwarded the same way, preserving their order.
        let (capture_tx, mut capture_event_rx) = mpsc::channel(1024);
        let capture_handle = tokio::task::spawn_blocking(move || {
            while let Ok(message) = capture_rx.recv() {
                if capture_tx.blocking_send(message).is_err() {
                    break;
                }
            }
        });

        publish_status(&tray_proxy, &session);

        loop {
            tokio::select! {
                // Capture first: input observed before a trigger must reach
                // the recorder before the trigger is handled.
                biased;

                Some(message) = capture_event_rx.recv() => {
                    let transition = session.on_capture(message);
                    if matches!(transition, Transition::Unavailable { .. }) {
                        publish_status(&tray_proxy, &session);
                    }
                }

                Some(event) = tray_event_rx.recv() => {
                    let Some(action) = MenuAction::parse(&event.id.0) else {
                        debug!(id = %event.id.0, "Unknown menu item");
                        continue;
                    };

                    match action {
                        MenuAction::Bind { role, key } => {
                            let result = rebind(
                                &mut session,
                                &mut config,
                                &bindings_tx,
                                &tray_proxy,
                                role,
                                key,
                            );
                            if let Err(e) = result {
                                warn!(error = ?e, "Rebind failed");
                                // The menu toggled the check mark locally; restore it.
                                publish_settings(&tray_proxy, &session);
                            }
                        }
                        MenuAction::SetCycleDelay(cycle_delay) => {
                            set_cycle_delay(&mut session, &mut config, &tray_proxy, cycle_delay);
                        }
                        MenuAction::Exit => {
                            info!("Exit requested from tray menu");
                            if let Err(e) = command_tx.send(AppCommand::Shutdown).await {
                                error!(error = ?e, "Failed to send shutdown command");
                            }
                        }
                    }
                }

                Some(cmd) = command_rx.recv() => {
                    match cmd {
                        AppCommand::Trigger { role } => {
                            drain_capture(&mut session, &mut capture_event_rx);
                            let transition = session.trigger(role, Instant::now());
                            log_transition(role, &transition);
                            publish_status(&tray_proxy, &session);
                        }
                        AppCommand::PlaybackFinished(exit) => {
                            session.on_playback_exit(exit);
                            publish_status(&tray_proxy, &session);
                        }
                        AppCommand::Shutdown => {
                            info!("Shutdown requested");
                            break;
                        }
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        // Halts playback and turns capture off before the process exits.
        session.stop_all();

        drop(tray_event_rx);
        drop(capture_event_rx);

        for (name, handle) in [("Tray event", tray_handle), ("Capture", capture_handle)] {
            match tokio::time::timeout(Duration::from_secs(1), handle).await {
                Ok(Ok(())) => info!(forwarder = name, "Forwarder stopped cleanly"),
                Ok(Err(e)) => error!(forwarder = name, error = ?e, "Forwarder task panicked"),
                Err(_) => info!(
                    forwarder = name,
                    "Forwarder did not stop within timeout, will be cleaned up on exit"
                ),
            }
        }

        let _ = shutdown_tx.send(true);
        let _ = tray_proxy.send_event(TrayCommand::Shutdown);
        info!("Macro Recorder shut down successfully");

        Ok(())
    }
}

/// Feed every capture message already queued into the session.
///
/// Returns the number of messages handled.
pub(crate) fn drain_capture(
    session: &mut MacroSession,
    capture_rx: &mut mpsc::Receiver<CaptureMessage>,
) -> usize {
    let mut drained = 0;
    while let Ok(message) = capture_rx.try_recv() {
        session.on_capture(message);
        drained += 1;
    }
    if drained > 0 {
        debug!(drained, "Queued capture messages handled before trigger");
    }
    drained
}

fn publish_status(tray_proxy: &EventLoopProxy<TrayCommand>, session: &MacroSession) {
    let status = session.status();
    let command = TrayCommand::SetStatus {
        state: TrayIconState::from(status),
        text: status.to_string(),
        recent: session.log().recent_display(RECENT_ACTIONS).to_vec(),
    };

    if tray_proxy.send_event(command).is_err() {
        warn!("Tray event loop closed, status not shown");
    }
}

fn publish_settings(tray_proxy: &EventLoopProxy<TrayCommand>, session: &MacroSession) {
    let command = TrayCommand::Reconfigure {
        bindings: *session.bindings(),
        cycle_delay: session.cycle_delay(),
    };

    if tray_proxy.send_event(command).is_err() {
        warn!("Tray event loop closed, settings not applied");
    }
}

#[instrument(skip(session, config, bindings_tx, tray_proxy))]
fn rebind(
    session: &mut MacroSession,
    config: &mut Config,
    bindings_tx: &watch::Sender<TriggerBindings>,
    tray_proxy: &EventLoopProxy<TrayCommand>,
    role: TriggerRole,
    key: TriggerKey,
) -> AppResult<()> {
    let bindings = apply_rebind(session, config, role, key)?;

    bindings_tx.send_replace(bindings);
    publish_settings(tray_proxy, session);
    publish_status(tray_proxy, session);

    config.save()
}

/// Rebind `role` in the session and mirror the result into `config`.
///
/// Leaves both untouched when the key is bound to another role.
#[track_caller]
pub(crate) fn apply_rebind(
    session: &mut MacroSession,
    config: &mut Config,
    role: TriggerRole,
    key: TriggerKey,
) -> AppResult<TriggerBindings> {
    session.rebind(role, key)?;

    let bindings = *session.bindings();
    config.triggers = (&bindings).into();
    Ok(bindings)
}

#[instrument(skip(session, config, tray_proxy))]
fn set_cycle_delay(
    session: &mut MacroSession,
    config: &mut Config,
    tray_proxy: &EventLoopProxy<TrayCommand>,
    cycle_delay: CycleDelay,
) {
    session.set_cycle_delay(cycle_delay);
    publish_settings(tray_proxy, session);

    config.playback.cycle_delay = cycle_delay;
    if let Err(e) = config.save() {
        error!(error = ?e, "Failed to save cycle delay");
    }
}

fn log_transition(role: TriggerRole, transition: &Transition) {
    match transition {
        Transition::RecordingStarted { session_id } => {
            info!(session_id = %session_id, "Recording started");
        }
        Transition::RecordingStopped { actions } => {
            info!(actions, "Recording stopped");
        }
        Transition::PlaybackStarted { run_id } => info!(run_id = %run_id, "Playback started"),
        Transition::PlaybackStopped { run_id } => info!(run_id = %run_id, "Playback stopped"),
        Transition::Reset => info!("Session reset"),
        Transition::Ignored(reason) => debug!(role = %role, reason = ?reason, "Trigger ignored"),
        Transition::Unavailable { reason } => warn!(reason = %reason, "Capture unavailable"),
        Transition::Recorded { .. } => {}
    }
}
