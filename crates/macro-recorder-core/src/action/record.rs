use crate::KeyCode;

use std::{fmt, time::Duration};

/// Absolute pointer coordinates in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Position {
    /// Create a position from raw coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Logical mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
    /// Any other platform button code.
    Other(u8),
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MouseButton::Left => f.write_str("Left"),
            MouseButton::Right => f.write_str("Right"),
            MouseButton::Middle => f.write_str("Middle"),
            MouseButton::Other(code) => write!(f, "Button{}", code),
        }
    }
}

/// Wheel movement in notches.
///
/// Positive `dy` scrolls up (away from the user), positive `dx` scrolls right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollDelta {
    /// Horizontal notches.
    pub dx: i32,
    /// Vertical notches.
    pub dy: i32,
}

impl ScrollDelta {
    /// Create a delta from raw notch counts.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// One recorded input action.
///
/// Every variant carries the wall-clock gap since the previously recorded
/// action. Playback waits for that gap before replaying the action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionRecord {
    /// Pointer moved to an absolute position.
    Move {
        /// Target position.
        position: Position,
        /// Gap since the previous action.
        delay: Duration,
    },
    /// Mouse button pressed or released at a position.
    Click {
        /// Pointer position at the time of the click.
        position: Position,
        /// Button that changed state.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
        /// Gap since the previous action.
        delay: Duration,
    },
    /// Wheel scrolled at a position.
    Scroll {
        /// Pointer position at the time of the scroll.
        position: Position,
        /// Wheel movement.
        delta: ScrollDelta,
        /// Gap since the previous action.
        delay: Duration,
    },
    /// Keyboard key pressed or released.
    Key {
        /// Logical key.
        key: KeyCode,
        /// `true` for press, `false` for release.
        pressed: bool,
        /// Gap since the previous action.
        delay: Duration,
    },
}

impl ActionRecord {
    /// Gap since the previously recorded action.
    pub fn delay(&self) -> Duration {
        match self {
            ActionRecord::Move { delay, .. }
            | ActionRecord::Click { delay, .. }
            | ActionRecord::Scroll { delay, .. }
            | ActionRecord::Key { delay, .. } => *delay,
        }
    }

    /// Gap since the previously recorded action, in seconds.
    pub fn delay_secs(&self) -> f64 {
        self.delay().as_secs_f64()
    }

    /// Pointer position this action places the pointer at, if any.
    pub fn position(&self) -> Option<Position> {
        match self {
            ActionRecord::Move { position, .. }
            | ActionRecord::Click { position, .. }
            | ActionRecord::Scroll { position, .. } => Some(*position),
            ActionRecord::Key { .. } => None,
        }
    }

    /// Whether replaying this action leaves the pointer at `position`.
    pub fn targets(&self, position: Position) -> bool {
        self.position() == Some(position)
    }

    /// Whether this is a key press (not a release).
    pub fn is_key_press(&self) -> bool {
        matches!(self, ActionRecord::Key { pressed: true, .. })
    }
}
