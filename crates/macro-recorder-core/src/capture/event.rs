use crate::{KeyCode, MouseButton, Position, ScrollDelta};

use std::time::Instant;

/// Input event observed by the global listener.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved.
    Move(Position),
    /// Mouse button changed state.
    Button {
        /// Button that changed state.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
        /// Pointer position if the listener has seen the pointer yet.
        position: Option<Position>,
    },
    /// Wheel scrolled.
    Scroll {
        /// Wheel movement.
        delta: ScrollDelta,
        /// Pointer position if the listener has seen the pointer yet.
        position: Option<Position>,
    },
    /// Keyboard key changed state.
    Key {
        /// Logical key.
        key: KeyCode,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
}

/// Message delivered from the listener thread to the session, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureMessage {
    /// An input event and the instant it was observed.
    Input {
        /// Observation time.
        at: Instant,
        /// The event.
        event: InputEvent,
    },
    /// The listener could not be established or stopped unexpectedly.
    Unavailable {
        /// Description of the failure.
        reason: String,
    },
}
