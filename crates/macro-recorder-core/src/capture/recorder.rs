//! Recording state machine.
//!
//! Turns timestamped [`InputEvent`]s into [`ActionRecord`]s, applying the
//! first-move anchor, key re-homing and trailing-move rules. Time is passed
//! in by the caller so the rules can be exercised without a real clock.

use crate::{ActionLog, ActionRecord, InputEvent, KeyCode, Position, RecordOrigin};

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

#[derive(Debug)]
struct ActiveRecording {
    session_id: Uuid,
    started_at: Instant,
    last_event_at: Instant,
    first_move: bool,
    last_position: Option<Position>,
    ignored_keys: Vec<KeyCode>,
}

impl ActiveRecording {
    fn elapsed_since_last(&mut self, at: Instant) -> Duration {
        let delay = at.saturating_duration_since(self.last_event_at);
        self.last_event_at = at.max(self.last_event_at);
        delay
    }
}

/// Owns the action log and the state of the recording in progress.
#[derive(Debug, Default)]
pub struct Recorder {
    log: ActionLog,
    active: Option<ActiveRecording>,
}

impl Recorder {
    /// Create an idle recorder with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new recording at `now`, clearing any previous log.
    ///
    /// Key events matching `ignored_keys` (the trigger keys) are never recorded.
    #[instrument(skip(self, ignored_keys))]
    pub fn start(&mut self, now: Instant, ignored_keys: Vec<KeyCode>) -> Uuid {
        self.log.clear();

        let session_id = Uuid::new_v4();
        self.active = Some(ActiveRecording {
            session_id,
            started_at: now,
            last_event_at: now,
            first_move: true,
            last_position: None,
            ignored_keys,
        });

        info!(session_id = %session_id, "Recording started");

        session_id
    }

    /// Record one observed event.
    ///
    /// Returns the number of records appended (zero when idle or ignored).
    pub fn record(&mut self, event: InputEvent, at: Instant) -> usize {
        let Some(active) = self.active.as_mut() else {
            return 0;
        };
        let before = self.log.len();

        match event {
            InputEvent::Move(position) => {
                let delay = active.elapsed_since_last(at);
                active.last_position = Some(position);

                if active.first_move {
                    active.first_move = false;
                    self.log
                        .push(ActionRecord::Move { position, delay }, RecordOrigin::Anchor);
                    self.log.push(
                        ActionRecord::Move {
                            position,
                            delay: Duration::ZERO,
                        },
                        RecordOrigin::Stream,
                    );
                } else {
                    self.log
                        .push(ActionRecord::Move { position, delay }, RecordOrigin::Stream);
                }
            }
            InputEvent::Button {
                button,
                pressed,
                position,
            } => {
                let Some(position) = position.or(active.last_position) else {
                    warn!(%button, pressed, "Pointer position unknown, click dropped");
                    return 0;
                };
                let delay = active.elapsed_since_last(at);
                self.log.push(
                    ActionRecord::Click {
                        position,
                        button,
                        pressed,
                        delay,
                    },
                    RecordOrigin::Input,
                );
            }
            InputEvent::Scroll { delta, position } => {
                let Some(position) = position.or(active.last_position) else {
                    warn!(dx = delta.dx, dy = delta.dy, "Pointer position unknown, scroll dropped");
                    return 0;
                };
                let delay = active.elapsed_since_last(at);
                self.log.push(
                    ActionRecord::Scroll {
                        position,
                        delta,
                        delay,
                    },
                    RecordOrigin::Input,
                );
            }
            InputEvent::Key { key, pressed } => {
                if active.ignored_keys.contains(&key) {
                    debug!(%key, pressed, "Trigger key not recorded");
                    return 0;
                }
                let mut delay = active.elapsed_since_last(at);

                if let Some(position) = active.last_position.filter(|_| pressed) {
                    self.log
                        .push(ActionRecord::Move { position, delay }, RecordOrigin::Rehome);
                    delay = Duration::ZERO;
                }

                self.log.push(
                    ActionRecord::Key {
                        key,
                        pressed,
                        delay,
                    },
                    RecordOrigin::Input,
                );
            }
        }

        self.log.len() - before
    }

    /// Stop the recording at `now`.
    ///
    /// Appends a trailing move to the last known pointer position unless the
    /// last record already leaves the pointer there. Returns the number of
    /// recorded actions, or `None` when no recording was in progress.
    #[instrument(skip(self))]
    pub fn stop(&mut self, now: Instant) -> Option<usize> {
        let mut active = self.active.take()?;

        if let Some(position) = active.last_position {
            let already_there = self
                .log
                .last()
                .is_some_and(|record| record.targets(position));

            if !already_there {
                let delay = active.elapsed_since_last(now);
                self.log
                    .push(ActionRecord::Move { position, delay }, RecordOrigin::Trailing);
            }
        }

        let duration = now.saturating_duration_since(active.started_at);
        info!(
            session_id = %active.session_id,
            actions = self.log.len(),
            duration_ms = duration.as_millis(),
            "Recording stopped"
        );

        Some(self.log.len())
    }

    /// Replace the keys filtered out of the recording in progress.
    pub fn set_ignored_keys(&mut self, ignored_keys: Vec<KeyCode>) {
        if let Some(active) = self.active.as_mut() {
            active.ignored_keys = ignored_keys;
        }
    }

    /// End any recording without a trailing move, keeping the log.
    pub fn abandon(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// End any recording and clear the log.
    pub fn reset(&mut self) {
        self.active = None;
        self.log.clear();
    }

    /// Whether a recording is in progress.
    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Id of the recording in progress.
    pub fn session_id(&self) -> Option<Uuid> {
        self.active.as_ref().map(|active| active.session_id)
    }

    /// The recorded actions.
    pub fn log(&self) -> &ActionLog {
        &self.log
    }
}
