//! System-wide input listener built on `rdev`.
//!
//! The hook runs on a dedicated thread for the lifetime of the process
//! (`rdev::listen` never returns while the hook is healthy). It always tracks
//! the pointer position, but only forwards events while capture is active.

use crate::{
    CaptureMessage, CoreResult, InputEvent, KeyCode, MacroError, MouseButton, Position,
    ScrollDelta,
};

use std::{
    panic::Location,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
    },
    time::Instant,
};

use enigo::{Enigo, Mouse, Settings};
use error_location::ErrorLocation;
use rdev::{Button, EventType};
use tracing::{debug, error, info, instrument};

/// Switch between the session and whatever delivers captured input.
pub trait CaptureControl: Send {
    /// Start or stop forwarding events.
    fn set_active(&self, active: bool);

    /// Why capture cannot work, if the listener has failed.
    fn unavailable_reason(&self) -> Option<String>;
}

/// Handle to the global input hook thread.
pub struct InputListener {
    active: Arc<AtomicBool>,
    failure: Arc<Mutex<Option<String>>>,
}

impl InputListener {
    /// Spawn the hook thread, delivering messages to `tx` in observation order.
    ///
    /// A hook that cannot be installed is not an error here: the thread
    /// records the failure and sends [`CaptureMessage::Unavailable`].
    ///
    /// # Errors
    ///
    /// Returns error if the thread itself cannot be spawned.
    #[track_caller]
    #[instrument(skip(tx))]
    pub fn spawn(tx: Sender<CaptureMessage>) -> CoreResult<Self> {
        let active = Arc::new(AtomicBool::new(false));
        let failure = Arc::new(Mutex::new(None));

        let hook_active = Arc::clone(&active);
        let hook_failure = Arc::clone(&failure);

        std::thread::Builder::new()
            .name("input-capture".to_string())
            .spawn(move || run_hook(tx, hook_active, hook_failure))
            .map_err(|source| MacroError::ThreadSpawnFailed {
                name: "input-capture",
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("Input listener spawned");

        Ok(Self { active, failure })
    }
}

impl CaptureControl for InputListener {
    fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
        debug!(active, "Input capture switched");
    }

    fn unavailable_reason(&self) -> Option<String> {
        self.failure
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

fn run_hook(
    tx: Sender<CaptureMessage>,
    active: Arc<AtomicBool>,
    failure: Arc<Mutex<Option<String>>>,
) {
    let mut pointer = current_pointer();
    let hook_tx = tx.clone();

    let result = rdev::listen(move |event| {
        let at = Instant::now();
        let Some(input) = translate(&event.event_type, &mut pointer) else {
            return;
        };
        if !active.load(Ordering::Acquire) {
            return;
        }
        // The receiver only disappears during shutdown.
        let _ = hook_tx.send(CaptureMessage::Input { at, event: input });
    });

    let reason = match result {
        Ok(()) => "listener exited".to_string(),
        Err(e) => format!("{:?}", e),
    };
    error!(reason = %reason, "Global input listener unavailable");

    *failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(reason.clone());
    let _ = tx.send(CaptureMessage::Unavailable { reason });
}

/// Seed pointer tracking so clicks before the first move still have a position.
fn current_pointer() -> Option<Position> {
    let enigo = Enigo::new(&Settings::default()).ok()?;
    let (x, y) = enigo.location().ok()?;
    Some(Position::new(x, y))
}

/// Convert a raw hook event, updating the tracked pointer position.
pub(crate) fn translate(event: &EventType, pointer: &mut Option<Position>) -> Option<InputEvent> {
    match event {
        EventType::MouseMove { x, y } => {
            let position = Position::new(x.round() as i32, y.round() as i32);
            *pointer = Some(position);
            Some(InputEvent::Move(position))
        }
        EventType::ButtonPress(button) => Some(InputEvent::Button {
            button: mouse_button(*button),
            pressed: true,
            position: *pointer,
        }),
        EventType::ButtonRelease(button) => Some(InputEvent::Button {
            button: mouse_button(*button),
            pressed: false,
            position: *pointer,
        }),
        EventType::Wheel { delta_x, delta_y } => Some(InputEvent::Scroll {
            delta: ScrollDelta::new(notches(*delta_x), notches(*delta_y)),
            position: *pointer,
        }),
        EventType::KeyPress(key) => Some(InputEvent::Key {
            key: KeyCode::from(*key),
            pressed: true,
        }),
        EventType::KeyRelease(key) => Some(InputEvent::Key {
            key: KeyCode::from(*key),
            pressed: false,
        }),
    }
}

fn mouse_button(button: Button) -> MouseButton {
    match button {
        Button::Left => MouseButton::Left,
        Button::Right => MouseButton::Right,
        Button::Middle => MouseButton::Middle,
        Button::Unknown(code) => MouseButton::Other(code),
    }
}

fn notches(delta: i64) -> i32 {
    delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
