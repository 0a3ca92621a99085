//! Macro Recorder: record mouse and keyboard input, replay it in a loop,
//! with global trigger keys and a system tray front-end.

mod app;
mod app_command;
mod config;
mod error;
mod hotkey_handler;
mod hotkey_registry;
mod menu_action;
mod tray_command;
mod tray_icon_state;
mod tray_manager;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    hotkey_handler::{HotkeyHandler, role_for_hotkey, trigger_hotkey},
    hotkey_registry::HotkeyRegistry,
    menu_action::{MenuAction, cycle_delay_choices},
    tray_command::TrayCommand,
    tray_icon_state::TrayIconState,
    tray_manager::{RECENT_ACTIONS, TrayManager},
};

use crate::config::Config;

use std::sync::Arc;

use macro_recorder_core::{EnigoSynth, ExitNotifier, InputListener, MacroSession};
use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{mpsc, watch};
use tracing::{error, warn};

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("macro_recorder=debug,macro_recorder_core=debug")
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };
    let bindings = config.triggers.bindings();
    let cycle_delay = config.playback.cycle_delay;

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new(&bindings, cycle_delay) {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    // Persists across event loop iterations; dropping it unregisters the keys.
    let mut hotkey_registry: Option<HotkeyRegistry> = None;
    let mut startup = Some(config);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => match cmd {
                TrayCommand::SetStatus {
                    state,
                    text,
                    recent,
                } => {
                    if let Err(e) = tray_manager.update_status(state, &text) {
                        error!(error = ?e, "Failed to update tray icon");
                    }
                    if let Err(e) = tray_manager.set_recent_actions(recent) {
                        error!(error = ?e, "Failed to update recent actions");
                    }
                }
                TrayCommand::Reconfigure {
                    bindings,
                    cycle_delay,
                } => {
                    if let Some(registry) = hotkey_registry.as_mut() {
                        if let Err(e) = registry.register(&bindings) {
                            error!(error = ?e, "Failed to register trigger keys");
                        }
                    }
                    if let Err(e) = tray_manager.rebuild_menu(&bindings, cycle_delay) {
                        error!(error = ?e, "Failed to rebuild tray menu");
                    }
                }
                TrayCommand::Shutdown => {
                    *control_flow = ControlFlow::ExitWithCode(0);
                }
            },
            Event::NewEvents(tao::event::StartCause::Init) => {
                let Some(config) = startup.take() else {
                    return;
                };

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                // Register hotkeys on the main thread; tao's event loop pumps
                // the Windows messages needed for WM_HOTKEY delivery.
                let mut registry = match HotkeyRegistry::new() {
                    Ok(r) => r,
                    Err(e) => {
                        error!("Failed to create hotkey manager: {:?}", e);
                        std::process::exit(1);
                    }
                };
                if let Err(e) = registry.register(&bindings) {
                    warn!(error = ?e, "Some trigger keys are not available");
                }
                hotkey_registry = Some(registry);

                let (capture_tx, capture_rx) = std::sync::mpsc::channel();
                let listener = match InputListener::spawn(capture_tx) {
                    Ok(l) => l,
                    Err(e) => {
                        error!("Failed to start input listener: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let (command_tx, command_rx) = mpsc::channel(32);
                let (shutdown_tx, shutdown_rx) = watch::channel(false);
                let (bindings_tx, bindings_rx) = watch::channel(bindings);

                let exit_tx = command_tx.clone();
                let exit_notifier: ExitNotifier = Arc::new(move |exit| {
                    // Never blocks: the app may be joining this very thread.
                    if let Err(e) = exit_tx.try_send(AppCommand::PlaybackFinished(exit)) {
                        warn!(error = %e, "Failed to report playback exit");
                    }
                });

                let session = MacroSession::new(
                    Box::new(listener),
                    EnigoSynth::factory(),
                    exit_notifier,
                    bindings,
                    cycle_delay,
                );

                let tray_proxy = tray_proxy.clone();

                // Spawn tokio runtime on separate thread.
                // TrayManager and the hotkey registry stay on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let hotkey_handler = HotkeyHandler::new(bindings_rx, command_tx.clone());

                        let app = App {
                            session,
                            config,
                            tray_proxy,
                            bindings_tx,
                            command_tx,
                            command_rx,
                            capture_rx,
                            shutdown_tx,
                        };

                        tokio::join!(
                            async {
                                if let Err(e) = hotkey_handler.run(shutdown_rx).await {
                                    error!(error = ?e, "Hotkey handler error");
                                }
                            },
                            async {
                                if let Err(e) = app.run().await {
                                    error!(error = ?e, "App error");
                                }
                            }
                        );
                    });
                });
            }
            _ => {}
        }
    });
}
