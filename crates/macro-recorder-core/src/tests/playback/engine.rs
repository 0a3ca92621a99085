use crate::{
    ActionRecord, ExitReason, KeyCode, MacroError, MouseButton, PlaybackEngine, PlaybackExit,
    Position, ScrollDelta, SynthFactory,
    tests::support::{SynthCall, calls, fake_factory, wait_for_calls},
};

use std::{
    sync::{Arc, mpsc},
    time::{Duration, Instant},
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn moves(delays_ms: &[u64]) -> Arc<[ActionRecord]> {
    delays_ms
        .iter()
        .enumerate()
        .map(|(i, delay)| ActionRecord::Move {
            position: Position::new(i as i32, i as i32),
            delay: ms(*delay),
        })
        .collect()
}

fn exit_channel() -> (
    impl FnOnce(PlaybackExit) + Send + 'static,
    mpsc::Receiver<PlaybackExit>,
) {
    let (tx, rx) = mpsc::channel();
    (
        move |exit| {
            let _ = tx.send(exit);
        },
        rx,
    )
}

/// WHAT: N passes take at least N * sum(delays) + (N - 1) * cycle delay
/// WHY: Playback must honour every recorded gap and the inter-cycle pause
#[test]
#[allow(clippy::unwrap_used)]
fn given_looping_run_when_two_passes_complete_then_lower_bound_holds() {
    // Given: Three moves totalling 60ms and a 100ms cycle delay
    let actions = moves(&[20, 30, 10]);
    let (factory, log) = fake_factory();
    let (on_exit, exits) = exit_channel();
    let mut engine = PlaybackEngine::new();

    // When: Running until two full passes have been replayed
    let started = Instant::now();
    let run_id = engine.start(actions, ms(100), factory, on_exit).unwrap();
    assert!(wait_for_calls(&log, 6, Duration::from_secs(5)));
    engine.stop();

    // Then: The sixth replayed action came no earlier than the bound
    let recorded = calls(&log);
    let sixth = recorded[5].0;
    assert!(sixth.duration_since(started) >= ms(2 * 60 + 100));

    // And: The exit report names this run with at least two passes
    let exit = exits.recv_timeout(Duration::from_secs(1)).unwrap();
    assert_eq!(exit.run_id, run_id);
    assert_eq!(exit.reason, ExitReason::Stopped);
    assert!(exit.passes >= 2);
}

/// WHAT: Stop interrupts a long per-action wait
/// WHY: A stop request must take effect within one record's delay
#[test]
#[allow(clippy::unwrap_used)]
fn given_long_delay_when_stopping_then_returns_promptly_without_replay() {
    // Given: One action that waits ten seconds
    let (factory, log) = fake_factory();
    let (on_exit, exits) = exit_channel();
    let mut engine = PlaybackEngine::new();
    engine
        .start(moves(&[10_000]), ms(1000), factory, on_exit)
        .unwrap();
    std::thread::sleep(ms(50));
    assert!(engine.is_running());

    // When: Stopping
    let stop_started = Instant::now();
    let stopped = engine.stop();

    // Then: The thread exits well before the delay and nothing was replayed
    assert!(stopped.is_some());
    assert!(stop_started.elapsed() < Duration::from_secs(2));
    assert!(!engine.is_running());
    assert!(calls(&log).is_empty());
    assert_eq!(exits.recv_timeout(ms(500)).unwrap().passes, 0);
}

/// WHAT: Clicks and scrolls move the pointer before acting
/// WHY: Replay positions the pointer where the input happened
#[test]
#[allow(clippy::unwrap_used)]
fn given_click_and_scroll_when_replaying_then_pointer_moved_first() {
    // Given: A click then a scroll at different positions
    let actions: Arc<[ActionRecord]> = Arc::from(vec![
        ActionRecord::Click {
            position: Position::new(5, 6),
            button: MouseButton::Right,
            pressed: true,
            delay: Duration::ZERO,
        },
        ActionRecord::Scroll {
            position: Position::new(7, 8),
            delta: ScrollDelta::new(0, 1),
            delay: Duration::ZERO,
        },
    ]);
    let (factory, log) = fake_factory();
    let (on_exit, _exits) = exit_channel();
    let mut engine = PlaybackEngine::new();

    // When: Replaying one pass
    engine.start(actions, ms(1000), factory, on_exit).unwrap();
    assert!(wait_for_calls(&log, 4, Duration::from_secs(2)));
    engine.stop();

    // Then: Move, button, move, scroll in that order
    let replayed: Vec<SynthCall> = calls(&log).into_iter().map(|(_, call)| call).collect();
    assert_eq!(
        &replayed[..4],
        &[
            SynthCall::Move(Position::new(5, 6)),
            SynthCall::Button(MouseButton::Right, true),
            SynthCall::Move(Position::new(7, 8)),
            SynthCall::Scroll(ScrollDelta::new(0, 1)),
        ]
    );
}

/// WHAT: Starting with no actions is rejected without spawning
/// WHY: An empty log has nothing to replay
#[test]
fn given_empty_actions_when_starting_then_empty_log_error() {
    let (factory, _log) = fake_factory();
    let (on_exit, _exits) = exit_channel();
    let mut engine = PlaybackEngine::new();

    let result = engine.start(moves(&[]), ms(1000), factory, on_exit);

    assert!(matches!(result, Err(MacroError::EmptyActionLog { .. })));
    assert!(!engine.is_running());
    assert!(engine.run_id().is_none());
}

/// WHAT: A second start while running is rejected
/// WHY: At most one playback thread may exist
#[test]
#[allow(clippy::unwrap_used)]
fn given_running_engine_when_starting_again_then_already_running_error() {
    // Given: A running engine
    let (factory, _log) = fake_factory();
    let (on_exit, _exits) = exit_channel();
    let (second_exit, _second_exits) = exit_channel();
    let mut engine = PlaybackEngine::new();
    let first = engine
        .start(moves(&[5_000]), ms(1000), Arc::clone(&factory), on_exit)
        .unwrap();

    // When: Starting again
    let result = engine.start(moves(&[1]), ms(1000), factory, second_exit);

    // Then: Rejected, and the first run is still current
    assert!(matches!(
        result,
        Err(MacroError::PlaybackAlreadyRunning { .. })
    ));
    assert_eq!(engine.run_id(), Some(first));
    engine.stop();
}

/// WHAT: A failing synthesizer ends the run with Unavailable
/// WHY: Missing platform synthesis is reported, not a crash
#[test]
#[allow(clippy::unwrap_used)]
fn given_unavailable_synth_when_starting_then_exit_reports_unavailable() {
    // Given: A factory that always fails
    let factory: SynthFactory = Arc::new(|| {
        Err(MacroError::SynthesisFailed {
            reason: "no display".to_string(),
            location: error_location::ErrorLocation::from(std::panic::Location::caller()),
        })
    });
    let (on_exit, exits) = exit_channel();
    let mut engine = PlaybackEngine::new();

    // When: Starting
    engine.start(moves(&[1]), ms(1000), factory, on_exit).unwrap();

    // Then: The thread reports Unavailable and ends
    let exit = exits.recv_timeout(Duration::from_secs(2)).unwrap();
    assert!(matches!(exit.reason, ExitReason::Unavailable(ref reason) if reason.contains("no display")));
    assert_eq!(exit.passes, 0);
}

/// WHAT: Stop interrupts the pause between passes
/// WHY: A stop request must not wait out a long cycle delay
#[test]
#[allow(clippy::unwrap_used)]
fn given_run_in_cycle_pause_when_stopping_then_returns_promptly_after_one_pass() {
    // Given: A zero-delay log with a ten second pause between passes
    let (factory, log) = fake_factory();
    let (on_exit, exits) = exit_channel();
    let mut engine = PlaybackEngine::new();
    engine
        .start(moves(&[0]), Duration::from_secs(10), factory, on_exit)
        .unwrap();
    assert!(wait_for_calls(&log, 1, Duration::from_secs(2)));
    std::thread::sleep(ms(50));

    // When: Stopping during the pause
    let stop_started = Instant::now();
    engine.stop();

    // Then: The thread exits well before the pause ends, after exactly one pass
    assert!(stop_started.elapsed() < Duration::from_secs(1));
    let exit = exits.recv_timeout(ms(500)).unwrap();
    assert_eq!(exit.passes, 1);
    assert_eq!(calls(&log).len(), 1);
}

/// WHAT: An action that fails to replay is skipped and the run continues
/// WHY: One unsynthesizable record must not end playback
#[test]
#[allow(clippy::unwrap_used)]
fn given_unmapped_key_when_replaying_then_later_actions_still_run() {
    // Given: An unmapped key press between two moves
    let actions: Arc<[ActionRecord]> = Arc::from(vec![
        ActionRecord::Move {
            position: Position::new(1, 1),
            delay: Duration::ZERO,
        },
        ActionRecord::Key {
            key: KeyCode::Unmapped("code 999".to_string()),
            pressed: true,
            delay: Duration::ZERO,
        },
        ActionRecord::Move {
            position: Position::new(2, 2),
            delay: Duration::ZERO,
        },
    ]);
    let (factory, log) = fake_factory();
    let (on_exit, _exits) = exit_channel();
    let mut engine = PlaybackEngine::new();

    // When: Replaying one pass
    engine.start(actions, ms(1000), factory, on_exit).unwrap();
    assert!(wait_for_calls(&log, 2, Duration::from_secs(2)));
    let still_running = engine.is_running();
    engine.stop();

    // Then: Both moves replayed in order and the run kept going
    let replayed: Vec<SynthCall> = calls(&log).into_iter().map(|(_, call)| call).collect();
    assert_eq!(
        &replayed[..2],
        &[
            SynthCall::Move(Position::new(1, 1)),
            SynthCall::Move(Position::new(2, 2)),
        ]
    );
    assert!(still_running);
}
