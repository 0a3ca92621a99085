use crate::TriggerKey;

use std::fmt;

use uuid::Uuid;

/// User-visible session status.
///
/// `Display` yields the short status text shown in the tray tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Idle with an empty log.
    Ready {
        /// Key that starts a recording.
        start_key: TriggerKey,
    },
    /// Recording in progress.
    Recording,
    /// Recording finished; the log is ready to play.
    RecordingStopped {
        /// Number of recorded actions.
        actions: usize,
    },
    /// Playback looping.
    Playing,
    /// Playback ended; the log is kept.
    PlaybackStopped,
    /// The global listener or the synthesizer is not available.
    Unavailable {
        /// Description of the failure.
        reason: String,
    },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready { start_key } => write!(f, "Press {} to start recording", start_key),
            Status::Recording => f.write_str("Recording..."),
            Status::RecordingStopped { actions } => {
                write!(f, "Recording stopped ({} actions)", actions)
            }
            Status::Playing => f.write_str("Playing..."),
            Status::PlaybackStopped => f.write_str("Playback stopped"),
            Status::Unavailable { reason } => write!(f, "Capture unavailable: {}", reason),
        }
    }
}

/// Why a request was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// Play requested with nothing recorded.
    EmptyLog,
    /// Play requested while a run is already looping.
    AlreadyPlaying,
    /// Play requested while recording.
    RecordingActive,
    /// Recording requested while playback is looping.
    PlaybackRunning,
    /// Stop-recording requested while not recording.
    NotRecording,
}

/// Outcome of a session operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A recording started.
    RecordingStarted {
        /// Recording id for log correlation.
        session_id: Uuid,
    },
    /// A recording ended.
    RecordingStopped {
        /// Number of recorded actions.
        actions: usize,
    },
    /// A playback run started.
    PlaybackStarted {
        /// Run id for log correlation.
        run_id: Uuid,
    },
    /// A playback run ended.
    PlaybackStopped {
        /// Id of the run that ended.
        run_id: Uuid,
    },
    /// Everything was stopped and the log cleared.
    Reset,
    /// The request was a no-op.
    Ignored(Ignored),
    /// Capture or synthesis is unavailable.
    Unavailable {
        /// Description of the failure.
        reason: String,
    },
    /// Captured input was appended to the log.
    Recorded {
        /// Records appended for this input.
        appended: usize,
    },
}
