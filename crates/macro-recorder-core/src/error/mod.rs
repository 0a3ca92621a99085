use crate::{TriggerKey, TriggerRole};

use error_location::ErrorLocation;
use thiserror::Error;

/// Macro recording and playback errors with source location tracking.
#[derive(Error, Debug)]
pub enum MacroError {
    /// The global input listener could not be established.
    #[error("Input capture unavailable: {reason} {location}")]
    CaptureUnavailable {
        /// Description of the listener failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The input synthesizer could not be created or rejected an action.
    #[error("Input synthesis failed: {reason} {location}")]
    SynthesisFailed {
        /// Description of the synthesis failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A trigger key is already bound to a different role.
    #[error("Trigger key {key} is already bound to {role} {location}")]
    DuplicateTriggerKey {
        /// The contested key.
        key: TriggerKey,
        /// The role currently holding the key.
        role: TriggerRole,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A trigger key name did not match any selectable key.
    #[error("Unknown trigger key: {name:?} {location}")]
    UnknownTriggerKey {
        /// The rejected key name.
        name: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Playback was started while another run is active.
    #[error("Playback already running {location}")]
    PlaybackAlreadyRunning {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Playback was started with no recorded actions.
    #[error("Action log is empty {location}")]
    EmptyActionLog {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Spawning a worker thread failed.
    #[error("Failed to spawn {name} thread: {source} {location}")]
    ThreadSpawnFailed {
        /// Thread name.
        name: &'static str,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`MacroError`].
pub type Result<T> = std::result::Result<T, MacroError>;
