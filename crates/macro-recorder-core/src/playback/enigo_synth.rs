use crate::{
    CoreResult, InputSynth, KeyCode, MacroError, MouseButton, Position, ScrollDelta, SynthFactory,
};

use std::{collections::HashSet, panic::Location, sync::Arc};

use enigo::{Axis, Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// [`InputSynth`] backed by `enigo`.
///
/// Keys and buttons pressed through this synthesizer and not yet released
/// are released when it is dropped, so stopping playback between a press
/// and its release never leaves input stuck. Release on drop is
/// best-effort: if it fails, the OS resets the state on the next physical
/// press/release by the user.
pub struct EnigoSynth {
    enigo: Enigo,
    held_keys: HashSet<KeyCode>,
    held_buttons: Vec<MouseButton>,
}

impl EnigoSynth {
    /// Connect to the platform input system.
    #[track_caller]
    #[instrument]
    pub fn new() -> CoreResult<Self> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| MacroError::SynthesisFailed {
            reason: format!("Failed to create Enigo: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self {
            enigo,
            held_keys: HashSet::new(),
            held_buttons: Vec::new(),
        })
    }

    /// Factory creating a fresh synthesizer on whichever thread calls it.
    pub fn factory() -> SynthFactory {
        Arc::new(|| Ok(Box::new(EnigoSynth::new()?) as Box<dyn InputSynth>))
    }
}

impl InputSynth for EnigoSynth {
    #[track_caller]
    fn move_pointer(&mut self, to: Position) -> CoreResult<()> {
        self.enigo
            .move_mouse(to.x, to.y, Coordinate::Abs)
            .map_err(|e| MacroError::SynthesisFailed {
                reason: format!("Failed to move pointer to {}: {}", to, e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    #[track_caller]
    fn button(&mut self, button: MouseButton, pressed: bool) -> CoreResult<()> {
        let Some(mapped) = enigo_button(button) else {
            return Err(MacroError::SynthesisFailed {
                reason: format!("Unsupported mouse button: {}", button),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        self.enigo
            .button(mapped, direction(pressed))
            .map_err(|e| MacroError::SynthesisFailed {
                reason: format!("Failed to {} {}: {}", verb(pressed), button, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if pressed {
            self.held_buttons.push(button);
        } else {
            self.held_buttons.retain(|held| *held != button);
        }

        Ok(())
    }

    #[track_caller]
    fn scroll(&mut self, delta: ScrollDelta) -> CoreResult<()> {
        if delta.dx != 0 {
            self.enigo
                .scroll(delta.dx, Axis::Horizontal)
                .map_err(|e| MacroError::SynthesisFailed {
                    reason: format!("Failed to scroll horizontally: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        // enigo scrolls down for positive lengths.
        if delta.dy != 0 {
            self.enigo
                .scroll(-delta.dy, Axis::Vertical)
                .map_err(|e| MacroError::SynthesisFailed {
                    reason: format!("Failed to scroll vertically: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        Ok(())
    }

    #[track_caller]
    fn key(&mut self, key: &KeyCode, pressed: bool) -> CoreResult<()> {
        let Some(mapped) = enigo_key(key) else {
            return Err(MacroError::SynthesisFailed {
                reason: format!("No synthesizable mapping for key {}", key),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        self.enigo
            .key(mapped, direction(pressed))
            .map_err(|e| MacroError::SynthesisFailed {
                reason: format!("Failed to {} key {}: {}", verb(pressed), key, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if pressed {
            self.held_keys.insert(key.clone());
        } else {
            self.held_keys.remove(key);
        }

        Ok(())
    }
}

impl Drop for EnigoSynth {
    fn drop(&mut self) {
        for key in self.held_keys.drain() {
            if let Some(mapped) = enigo_key(&key) {
                let _ = self.enigo.key(mapped, Direction::Release);
                debug!(%key, "Released held key");
            }
        }
        for button in self.held_buttons.drain(..) {
            if let Some(mapped) = enigo_button(button) {
                let _ = self.enigo.button(mapped, Direction::Release);
                debug!(%button, "Released held button");
            }
        }
    }
}

fn direction(pressed: bool) -> Direction {
    if pressed {
        Direction::Press
    } else {
        Direction::Release
    }
}

fn verb(pressed: bool) -> &'static str {
    if pressed { "press" } else { "release" }
}

pub(crate) fn enigo_button(button: MouseButton) -> Option<Button> {
    match button {
        MouseButton::Left => Some(Button::Left),
        MouseButton::Right => Some(Button::Right),
        MouseButton::Middle => Some(Button::Middle),
        MouseButton::Other(_) => None,
    }
}

pub(crate) fn enigo_key(key: &KeyCode) -> Option<Key> {
    let mapped = match key {
        KeyCode::Char(c) => Key::Unicode(*c),
        KeyCode::Function(n) => match n {
            1 => Key::F1,
            2 => Key::F2,
            3 => Key::F3,
            4 => Key::F4,
            5 => Key::F5,
            6 => Key::F6,
            7 => Key::F7,
            8 => Key::F8,
            9 => Key::F9,
            10 => Key::F10,
            11 => Key::F11,
            12 => Key::F12,
            _ => return None,
        },
        KeyCode::Enter => Key::Return,
        KeyCode::Space => Key::Space,
        KeyCode::Tab => Key::Tab,
        KeyCode::Escape => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Up => Key::UpArrow,
        KeyCode::Down => Key::DownArrow,
        KeyCode::Left => Key::LeftArrow,
        KeyCode::Right => Key::RightArrow,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Shift => Key::Shift,
        KeyCode::Control => Key::Control,
        KeyCode::Alt => Key::Alt,
        KeyCode::Meta => Key::Meta,
        KeyCode::CapsLock => Key::CapsLock,
        KeyCode::Unmapped(_) => return None,
    };

    Some(mapped)
}
