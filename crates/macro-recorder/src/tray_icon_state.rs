use macro_recorder_core::Status;

/// Tray icon states corresponding to the session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Nothing running.
    Idle,
    /// Capturing input.
    Recording,
    /// Replaying the log.
    Playing,
    /// Capture or synthesis is not available.
    Unavailable,
}

impl TrayIconState {
    /// Fill colour of the generated icon, as RGB.
    pub fn color(self) -> [u8; 3] {
        match self {
            TrayIconState::Idle => [0x8a, 0x8f, 0x98],
            TrayIconState::Recording => [0xd9, 0x30, 0x25],
            TrayIconState::Playing => [0x2e, 0xa0, 0x43],
            TrayIconState::Unavailable => [0xe3, 0x9b, 0x1b],
        }
    }
}

impl From<&Status> for TrayIconState {
    fn from(status: &Status) -> Self {
        match status {
            Status::Recording => TrayIconState::Recording,
            Status::Playing => TrayIconState::Playing,
            Status::Unavailable { .. } => TrayIconState::Unavailable,
            Status::Ready { .. } | Status::RecordingStopped { .. } | Status::PlaybackStopped => {
                TrayIconState::Idle
            }
        }
    }
}
