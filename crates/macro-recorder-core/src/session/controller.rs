//! Session controller.
//!
//! Single owner of the recorder, the action log, the playback engine and the
//! trigger configuration. All state changes go through its transition
//! methods; recording and playback never overlap.

use crate::{
    ActionLog, CaptureControl, CaptureMessage, CoreResult, CycleDelay, ExitReason, Ignored,
    PlaybackEngine, PlaybackExit, Recorder, Status, SynthFactory, Transition, TriggerBindings,
    TriggerKey, TriggerRole,
};

use std::{sync::Arc, time::Instant};

use tracing::{debug, error, info, instrument, warn};

/// Callback receiving playback thread exits.
pub type ExitNotifier = Arc<dyn Fn(PlaybackExit) + Send + Sync>;

/// Recording and playback session driven by the trigger keys.
pub struct MacroSession {
    recorder: Recorder,
    playback: PlaybackEngine,
    capture: Box<dyn CaptureControl>,
    synth_factory: SynthFactory,
    exit_notifier: ExitNotifier,
    bindings: TriggerBindings,
    cycle_delay: CycleDelay,
    status: Status,
}

impl MacroSession {
    /// Create an idle session.
    ///
    /// `exit_notifier` is invoked from the playback thread whenever a run
    /// ends; forward its report to [`MacroSession::on_playback_exit`].
    pub fn new(
        capture: Box<dyn CaptureControl>,
        synth_factory: SynthFactory,
        exit_notifier: ExitNotifier,
        bindings: TriggerBindings,
        cycle_delay: CycleDelay,
    ) -> Self {
        let status = match capture.unavailable_reason() {
            Some(reason) => Status::Unavailable { reason },
            None => Status::Ready {
                start_key: bindings.key(TriggerRole::Start),
            },
        };

        Self {
            recorder: Recorder::new(),
            playback: PlaybackEngine::new(),
            capture,
            synth_factory,
            exit_notifier,
            bindings,
            cycle_delay,
            status,
        }
    }

    /// Dispatch a trigger key press.
    #[instrument(skip(self, now))]
    pub fn trigger(&mut self, role: TriggerRole, now: Instant) -> Transition {
        match role {
            TriggerRole::Start => self.toggle_recording(now),
            TriggerRole::Play => self.play(),
            TriggerRole::Stop => self.stop_all(),
        }
    }

    /// Start recording when idle, stop it when recording.
    pub fn toggle_recording(&mut self, now: Instant) -> Transition {
        if self.recorder.is_recording() {
            self.stop_recording(now)
        } else {
            self.start_recording(now)
        }
    }

    /// Clear the log and start recording.
    #[instrument(skip(self, now))]
    pub fn start_recording(&mut self, now: Instant) -> Transition {
        if self.playback.is_running() {
            debug!("Recording ignored while playback is running");
            return Transition::Ignored(Ignored::PlaybackRunning);
        }

        if let Some(reason) = self.capture.unavailable_reason() {
            warn!(reason = %reason, "Recording unavailable");
            self.status = Status::Unavailable {
                reason: reason.clone(),
            };
            return Transition::Unavailable { reason };
        }

        let session_id = self.recorder.start(now, self.bindings.key_codes());
        self.capture.set_active(true);
        self.status = Status::Recording;

        Transition::RecordingStarted { session_id }
    }

    /// Stop recording, appending the trailing pointer move if needed.
    #[instrument(skip(self, now))]
    pub fn stop_recording(&mut self, now: Instant) -> Transition {
        self.capture.set_active(false);

        match self.recorder.stop(now) {
            Some(actions) => {
                self.status = Status::RecordingStopped { actions };
                Transition::RecordingStopped { actions }
            }
            None => Transition::Ignored(Ignored::NotRecording),
        }
    }

    /// Start looping playback of the recorded log.
    ///
    /// A no-op while recording, while already playing, or with an empty log.
    #[instrument(skip(self))]
    pub fn play(&mut self) -> Transition {
        let ignored = if self.recorder.is_recording() {
            Some(Ignored::RecordingActive)
        } else if self.recorder.log().is_empty() {
            Some(Ignored::EmptyLog)
        } else if self.playback.is_running() {
            Some(Ignored::AlreadyPlaying)
        } else {
            None
        };

        if let Some(reason) = ignored {
            debug!(?reason, "Play ignored");
            return Transition::Ignored(reason);
        }

        let notify = Arc::clone(&self.exit_notifier);
        let result = self.playback.start(
            self.recorder.log().snapshot(),
            self.cycle_delay.as_duration(),
            Arc::clone(&self.synth_factory),
            move |exit| notify(exit),
        );

        match result {
            Ok(run_id) => {
                self.status = Status::Playing;
                Transition::PlaybackStarted { run_id }
            }
            Err(e) => {
                error!(error = ?e, "Failed to start playback");
                let reason = e.to_string();
                self.status = Status::Unavailable {
                    reason: reason.clone(),
                };
                Transition::Unavailable { reason }
            }
        }
    }

    /// Stop playback and recording, clear the log and return to idle.
    #[instrument(skip(self))]
    pub fn stop_all(&mut self) -> Transition {
        let stopped_run = self.playback.stop();
        let was_recording = self.recorder.is_recording();

        self.capture.set_active(false);
        self.recorder.reset();
        self.status = self.idle_status();

        info!(
            stopped_run = ?stopped_run,
            was_recording,
            "Session reset"
        );

        Transition::Reset
    }

    /// Feed one message from the capture channel.
    pub fn on_capture(&mut self, message: CaptureMessage) -> Transition {
        match message {
            CaptureMessage::Input { at, event } => {
                let appended = self.recorder.record(event, at);
                Transition::Recorded { appended }
            }
            CaptureMessage::Unavailable { reason } => {
                self.capture.set_active(false);
                if self.recorder.abandon() {
                    warn!(reason = %reason, "Recording ended, capture unavailable");
                }
                self.status = Status::Unavailable {
                    reason: reason.clone(),
                };
                Transition::Unavailable { reason }
            }
        }
    }

    /// Handle a report from a finished playback thread.
    ///
    /// Reports from runs that were already stopped leave the status alone.
    #[instrument(skip(self))]
    pub fn on_playback_exit(&mut self, exit: PlaybackExit) -> Transition {
        if self.playback.run_id() != Some(exit.run_id) {
            debug!(run_id = %exit.run_id, "Stale playback exit");
            return Transition::PlaybackStopped {
                run_id: exit.run_id,
            };
        }

        self.playback.stop();

        match exit.reason {
            ExitReason::Stopped => {
                self.status = Status::PlaybackStopped;
                Transition::PlaybackStopped {
                    run_id: exit.run_id,
                }
            }
            ExitReason::Unavailable(reason) => {
                self.status = Status::Unavailable {
                    reason: reason.clone(),
                };
                Transition::Unavailable { reason }
            }
        }
    }

    /// Bind `key` to `role`.
    ///
    /// # Errors
    ///
    /// Returns error if `key` is bound to another role.
    #[track_caller]
    pub fn rebind(&mut self, role: TriggerRole, key: TriggerKey) -> CoreResult<()> {
        self.bindings.rebind(role, key)?;
        self.recorder.set_ignored_keys(self.bindings.key_codes());

        if matches!(self.status, Status::Ready { .. }) {
            self.status = self.idle_status();
        }

        Ok(())
    }

    /// Change the pause between passes; applies from the next run.
    pub fn set_cycle_delay(&mut self, cycle_delay: CycleDelay) {
        info!(cycle_delay = %cycle_delay, "Cycle delay changed");
        self.cycle_delay = cycle_delay;
    }

    /// Current status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Recorded actions.
    pub fn log(&self) -> &ActionLog {
        self.recorder.log()
    }

    /// Current trigger bindings.
    pub fn bindings(&self) -> &TriggerBindings {
        &self.bindings
    }

    /// Current pause between passes.
    pub fn cycle_delay(&self) -> CycleDelay {
        self.cycle_delay
    }

    /// Whether a recording is in progress.
    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    /// Whether playback is looping.
    pub fn is_playing(&self) -> bool {
        self.playback.is_running()
    }

    fn idle_status(&self) -> Status {
        match self.capture.unavailable_reason() {
            Some(reason) => Status::Unavailable { reason },
            None => Status::Ready {
                start_key: self.bindings.key(TriggerRole::Start),
            },
        }
    }
}
