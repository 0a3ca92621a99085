//! Macro Recorder Core Library
//!
//! Records global mouse and keyboard input into an ordered, timestamped
//! action log and replays it in a loop on a background thread.
//!
//! # Example
//!
//! ```no_run
//! use macro_recorder_core::{
//!     CoreResult, CycleDelay, EnigoSynth, InputListener, MacroSession, PlaybackExit,
//!     TriggerBindings, TriggerRole,
//! };
//!
//! use std::{sync::{Arc, mpsc}, time::Instant};
//!
//! fn main() -> CoreResult<()> {
//!     let (capture_tx, capture_rx) = mpsc::channel();
//!     let listener = InputListener::spawn(capture_tx)?;
//!
//!     let mut session = MacroSession::new(
//!         Box::new(listener),
//!         EnigoSynth::factory(),
//!         Arc::new(|exit: PlaybackExit| println!("playback ended: {:?}", exit.reason)),
//!         TriggerBindings::default(),
//!         CycleDelay::default(),
//!     );
//!
//!     session.trigger(TriggerRole::Start, Instant::now());
//!     // ... feed capture_rx messages into session.on_capture(...)
//!     # drop(capture_rx);
//!     session.trigger(TriggerRole::Start, Instant::now());
//!     session.trigger(TriggerRole::Play, Instant::now());
//!     Ok(())
//! }
//! ```

mod action;
mod capture;
mod error;
mod playback;
mod session;
mod trigger;

pub use {
    action::{ActionLog, ActionRecord, KeyCode, MouseButton, Position, RecordOrigin, ScrollDelta},
    capture::{CaptureControl, CaptureMessage, InputEvent, InputListener, Recorder},
    error::{MacroError, Result as CoreResult},
    playback::{
        CycleDelay, EnigoSynth, ExitReason, InputSynth, PlaybackEngine, PlaybackExit,
        SynthFactory,
    },
    session::{ExitNotifier, Ignored, MacroSession, Status, Transition},
    trigger::{TriggerBindings, TriggerKey, TriggerRole},
};
