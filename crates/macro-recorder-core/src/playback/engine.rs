//! Looping playback on a dedicated thread.
//!
//! State machine: `Idle -> Running -> Idle`. A run is cancelled through its
//! stop channel: sending on it or dropping the sender wakes whichever wait
//! the thread is in, so a stop takes effect before the next action is
//! replayed and before the next pass starts.

use crate::{ActionRecord, CoreResult, InputSynth, MacroError, SynthFactory};

use std::{
    panic::Location,
    sync::{
        Arc,
        mpsc::{self, Receiver, RecvTimeoutError, Sender},
    },
    thread::JoinHandle,
    time::{Duration, Instant},
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Why a playback run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// A stop was requested.
    Stopped,
    /// The synthesizer could not be created.
    Unavailable(String),
}

/// Report sent when a playback thread finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackExit {
    /// Id of the run that finished.
    pub run_id: Uuid,
    /// Full passes over the log completed before the run ended.
    pub passes: u64,
    /// Why the run ended.
    pub reason: ExitReason,
}

struct PlaybackRun {
    run_id: Uuid,
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

/// Owner of the (at most one) playback thread.
#[derive(Default)]
pub struct PlaybackEngine {
    run: Option<PlaybackRun>,
}

impl PlaybackEngine {
    /// Create an idle engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start looping over `actions` on a new thread.
    ///
    /// `on_exit` is called from the playback thread when the run ends.
    ///
    /// # Errors
    ///
    /// Returns error if `actions` is empty, a run is already active, or the
    /// thread cannot be spawned.
    #[track_caller]
    #[instrument(skip(self, actions, factory, on_exit), fields(actions = actions.len()))]
    pub fn start<F>(
        &mut self,
        actions: Arc<[ActionRecord]>,
        cycle_delay: Duration,
        factory: SynthFactory,
        on_exit: F,
    ) -> CoreResult<Uuid>
    where
        F: FnOnce(PlaybackExit) + Send + 'static,
    {
        if actions.is_empty() {
            return Err(MacroError::EmptyActionLog {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.is_running() {
            return Err(MacroError::PlaybackAlreadyRunning {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        // Reap a run that ended on its own.
        self.stop();

        let run_id = Uuid::new_v4();
        let (stop_tx, stop_rx) = mpsc::channel();

        let handle = std::thread::Builder::new()
            .name("macro-playback".to_string())
            .spawn(move || {
                let exit = match factory() {
                    Ok(mut synth) => {
                        let passes = run_passes(&actions, cycle_delay, synth.as_mut(), &stop_rx);
                        PlaybackExit {
                            run_id,
                            passes,
                            reason: ExitReason::Stopped,
                        }
                    }
                    Err(e) => {
                        warn!(run_id = %run_id, error = ?e, "Input synthesis unavailable");
                        PlaybackExit {
                            run_id,
                            passes: 0,
                            reason: ExitReason::Unavailable(e.to_string()),
                        }
                    }
                };

                info!(run_id = %run_id, passes = exit.passes, "Playback thread finished");
                on_exit(exit);
            })
            .map_err(|source| MacroError::ThreadSpawnFailed {
                name: "macro-playback",
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(
            run_id = %run_id,
            cycle_delay_ms = cycle_delay.as_millis(),
            "Playback started"
        );

        self.run = Some(PlaybackRun {
            run_id,
            stop_tx,
            handle,
        });

        Ok(run_id)
    }

    /// Signal the active run to stop and wait for its thread.
    ///
    /// The wait is bounded by one in-flight synthesis call. Returns the id of
    /// the run that was stopped.
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> Option<Uuid> {
        let run = self.run.take()?;

        // A closed channel means the thread already left its loop.
        let _ = run.stop_tx.send(());
        drop(run.stop_tx);

        if run.handle.join().is_err() {
            warn!(run_id = %run.run_id, "Playback thread panicked");
        }

        debug!(run_id = %run.run_id, "Playback stopped");

        Some(run.run_id)
    }

    /// Whether a playback thread is currently looping.
    pub fn is_running(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| !run.handle.is_finished())
    }

    /// Id of the current run, if any.
    pub fn run_id(&self) -> Option<Uuid> {
        self.run.as_ref().map(|run| run.run_id)
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Replay `actions` in full passes until a stop is signalled.
///
/// Returns the number of completed passes.
fn run_passes(
    actions: &[ActionRecord],
    cycle_delay: Duration,
    synth: &mut dyn InputSynth,
    stop_rx: &Receiver<()>,
) -> u64 {
    let mut passes = 0;

    loop {
        let pass_started = Instant::now();

        for action in actions {
            if stop_requested(stop_rx, action.delay()) {
                return passes;
            }
            if let Err(e) = synth.replay(action) {
                warn!(error = %e, "Action skipped");
            }
        }

        passes += 1;
        debug!(
            pass = passes,
            duration_ms = pass_started.elapsed().as_millis(),
            "Playback pass complete"
        );

        if stop_requested(stop_rx, cycle_delay) {
            return passes;
        }
    }
}

/// Wait for `timeout`, returning early with `true` if a stop arrives.
fn stop_requested(stop_rx: &Receiver<()>, timeout: Duration) -> bool {
    match stop_rx.recv_timeout(timeout) {
        Err(RecvTimeoutError::Timeout) => false,
        Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
    }
}
