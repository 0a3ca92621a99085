mod key_code;
mod log;
mod record;

pub use {
    key_code::KeyCode,
    log::{ActionLog, RecordOrigin},
    record::{ActionRecord, MouseButton, Position, ScrollDelta},
};
