mod controller;
mod status;

pub use {
    controller::{ExitNotifier, MacroSession},
    status::{Ignored, Status, Transition},
};
