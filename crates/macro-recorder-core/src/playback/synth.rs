use crate::{ActionRecord, CoreResult, KeyCode, MouseButton, Position, ScrollDelta};

use std::sync::Arc;

/// Backend that turns recorded actions back into system input.
pub trait InputSynth {
    /// Move the pointer to an absolute position.
    fn move_pointer(&mut self, to: Position) -> CoreResult<()>;

    /// Press or release a mouse button at the current pointer position.
    fn button(&mut self, button: MouseButton, pressed: bool) -> CoreResult<()>;

    /// Scroll the wheel at the current pointer position.
    fn scroll(&mut self, delta: ScrollDelta) -> CoreResult<()>;

    /// Press or release a key.
    fn key(&mut self, key: &KeyCode, pressed: bool) -> CoreResult<()>;

    /// Replay one recorded action.
    ///
    /// Clicks and scrolls move the pointer to the recorded position first.
    fn replay(&mut self, action: &ActionRecord) -> CoreResult<()> {
        match action {
            ActionRecord::Move { position, .. } => self.move_pointer(*position),
            ActionRecord::Click {
                position,
                button,
                pressed,
                ..
            } => {
                self.move_pointer(*position)?;
                self.button(*button, *pressed)
            }
            ActionRecord::Scroll {
                position, delta, ..
            } => {
                self.move_pointer(*position)?;
                self.scroll(*delta)
            }
            ActionRecord::Key { key, pressed, .. } => self.key(key, *pressed),
        }
    }
}

/// Creates a synthesizer on the playback thread.
///
/// Platform synthesizers are not `Send`, so the playback thread builds its own.
pub type SynthFactory = Arc<dyn Fn() -> CoreResult<Box<dyn InputSynth>> + Send + Sync>;
