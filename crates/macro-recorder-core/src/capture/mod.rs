mod event;
pub(crate) mod listener;
mod recorder;

pub use {
    event::{CaptureMessage, InputEvent},
    listener::{CaptureControl, InputListener},
    recorder::Recorder,
};
