use crate::{ActionRecord, InputEvent, KeyCode, MouseButton, Position, Recorder, ScrollDelta};

use std::time::{Duration, Instant};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn key_press(c: char) -> InputEvent {
    InputEvent::Key {
        key: KeyCode::Char(c),
        pressed: true,
    }
}

/// WHAT: Move, click, stop scenario produces anchor, stream move and click only
/// WHY: Last action already targets the pointer, so no trailing move is added
#[test]
fn given_move_then_click_when_stopping_then_no_trailing_move() {
    // Given: A recording started at t0
    let t0 = Instant::now();
    let mut recorder = Recorder::new();
    recorder.start(t0, Vec::new());
    let target = Position::new(100, 100);

    // When: Moving after 2.0s, pressing left after 0.1s, stopping after 0.05s
    recorder.record(InputEvent::Move(target), t0 + ms(2000));
    recorder.record(
        InputEvent::Button {
            button: MouseButton::Left,
            pressed: true,
            position: Some(target),
        },
        t0 + ms(2100),
    );
    let actions = recorder.stop(t0 + ms(2150));

    // Then: Three records, no trailing move
    assert_eq!(actions, Some(3));
    assert_eq!(
        recorder.log().records(),
        &[
            ActionRecord::Move {
                position: target,
                delay: ms(2000),
            },
            ActionRecord::Move {
                position: target,
                delay: Duration::ZERO,
            },
            ActionRecord::Click {
                position: target,
                button: MouseButton::Left,
                pressed: true,
                delay: ms(100),
            },
        ]
    );
}

/// WHAT: Starting a recording clears the previous log
/// WHY: Every recording begins from an empty log
#[test]
fn given_previous_recording_when_starting_again_then_log_empty() {
    // Given: A finished recording with actions
    let t0 = Instant::now();
    let mut recorder = Recorder::new();
    recorder.start(t0, Vec::new());
    recorder.record(InputEvent::Move(Position::new(1, 1)), t0 + ms(10));
    recorder.stop(t0 + ms(20));
    assert!(!recorder.log().is_empty());

    // When: Starting a new recording
    recorder.start(t0 + ms(30), Vec::new());

    // Then: Log and display are empty
    assert!(recorder.log().is_empty());
    assert!(recorder.log().display().is_empty());
    assert!(recorder.is_recording());
}

/// WHAT: Stop appends exactly one trailing move when the pointer moved away
/// WHY: Replay must end with the pointer where recording ended
#[test]
fn given_key_after_move_when_stopping_then_single_trailing_move() {
    // Given: A recording with a move followed by a key release
    let t0 = Instant::now();
    let mut recorder = Recorder::new();
    recorder.start(t0, Vec::new());
    let position = Position::new(40, 50);
    recorder.record(InputEvent::Move(position), t0 + ms(100));
    recorder.record(
        InputEvent::Key {
            key: KeyCode::Enter,
            pressed: false,
        },
        t0 + ms(200),
    );

    // When: Stopping 300ms later
    recorder.stop(t0 + ms(500));

    // Then: The last record is a move to the last position with the gap
    let records = recorder.log().records();
    assert_eq!(
        records.last(),
        Some(&ActionRecord::Move {
            position,
            delay: ms(300),
        })
    );
    let trailing = records
        .iter()
        .rev()
        .take_while(|record| matches!(record, ActionRecord::Move { .. }))
        .count();
    assert_eq!(trailing, 1);
    assert_eq!(
        recorder.log().display().last().map(String::as_str),
        Some("Last move to (40, 50), delay: 0.30s")
    );
}

/// WHAT: Stop without any pointer movement appends nothing
/// WHY: There is no last known pointer position to restore
#[test]
fn given_no_moves_when_stopping_then_nothing_appended() {
    // Given: A recording with only key input
    let t0 = Instant::now();
    let mut recorder = Recorder::new();
    recorder.start(t0, Vec::new());
    recorder.record(key_press('a'), t0 + ms(10));

    // When: Stopping
    let actions = recorder.stop(t0 + ms(20));

    // Then: Only the key record exists
    assert_eq!(actions, Some(1));
    assert!(matches!(
        recorder.log().records(),
        [ActionRecord::Key { pressed: true, .. }]
    ));
}

/// WHAT: Every key press is preceded by a move to the last pointer position
/// WHY: Playback re-homes the pointer before each keystroke
#[test]
fn given_known_pointer_when_pressing_keys_then_each_press_rehomed() {
    // Given: A recording with a known pointer position
    let t0 = Instant::now();
    let mut recorder = Recorder::new();
    recorder.start(t0, Vec::new());
    let position = Position::new(7, 9);
    recorder.record(InputEvent::Move(position), t0 + ms(10));

    // When: Pressing two keys and releasing one
    recorder.record(key_press('h'), t0 + ms(500));
    recorder.record(
        InputEvent::Key {
            key: KeyCode::Char('h'),
            pressed: false,
        },
        t0 + ms(550),
    );
    recorder.record(key_press('i'), t0 + ms(700));

    // Then: Each press is directly after a re-home move carrying the delay
    let records = recorder.log().records();
    for (index, record) in records.iter().enumerate() {
        if record.is_key_press() {
            assert_eq!(record.delay(), Duration::ZERO);
            assert!(index > 0);
            assert!(records[index - 1].targets(position));
            assert!(matches!(records[index - 1], ActionRecord::Move { .. }));
        }
    }
    assert_eq!(records[2].delay(), ms(490));
    // The release is not re-homed.
    assert!(matches!(
        records[4],
        ActionRecord::Key { pressed: false, .. }
    ));
    assert!(matches!(records[3], ActionRecord::Key { pressed: true, .. }));
}

/// WHAT: Key press with no pointer history is recorded alone
/// WHY: Re-homing only applies when a position is known
#[test]
fn given_unknown_pointer_when_pressing_key_then_no_rehome() {
    // Given: A fresh recording
    let t0 = Instant::now();
    let mut recorder = Recorder::new();
    recorder.start(t0, Vec::new());

    // When: Pressing a key after 250ms
    let appended = recorder.record(key_press('x'), t0 + ms(250));

    // Then: Only the key is recorded, carrying the full delay
    assert_eq!(appended, 1);
    assert_eq!(recorder.log().records()[0].delay(), ms(250));
}

/// WHAT: Trigger keys are not recorded
/// WHY: The keys that drive the recorder must not end up in the macro
#[test]
fn given_ignored_trigger_key_when_pressed_then_not_recorded() {
    // Given: A recording that ignores F6
    let t0 = Instant::now();
    let mut recorder = Recorder::new();
    recorder.start(t0, vec![KeyCode::Function(6)]);

    // When: F6 is pressed and released
    let pressed = recorder.record(
        InputEvent::Key {
            key: KeyCode::Function(6),
            pressed: true,
        },
        t0 + ms(5),
    );
    let released = recorder.record(
        InputEvent::Key {
            key: KeyCode::Function(6),
            pressed: false,
        },
        t0 + ms(6),
    );

    // Then: Nothing is appended
    assert_eq!(pressed + released, 0);
    assert!(recorder.log().is_empty());
}

/// WHAT: Only the first move is duplicated and shown in the display list
/// WHY: The anchor gives replay a starting point; the stream stays hidden
#[test]
fn given_several_moves_when_recording_then_only_first_is_anchored() {
    // Given: A fresh recording
    let t0 = Instant::now();
    let mut recorder = Recorder::new();
    recorder.start(t0, Vec::new());

    // When: Three moves arrive
    let first = recorder.record(InputEvent::Move(Position::new(1, 1)), t0 + ms(100));
    let second = recorder.record(InputEvent::Move(Position::new(2, 2)), t0 + ms(150));
    let third = recorder.record(InputEvent::Move(Position::new(3, 3)), t0 + ms(175));

    // Then: The first appends two records, the rest one each
    assert_eq!((first, second, third), (2, 1, 1));
    assert_eq!(recorder.log().display().len(), 1);
    assert_eq!(
        recorder.log().display()[0],
        "First move to (1, 1), delay: 0.10s"
    );
    assert_eq!(recorder.log().total_delay(), ms(175));
}

/// WHAT: Clicks and scrolls fall back to the last recorded pointer position
/// WHY: The listener may not have a position of its own yet
#[test]
fn given_event_without_position_when_recording_then_last_position_used() {
    // Given: A recording with one move
    let t0 = Instant::now();
    let mut recorder = Recorder::new();
    recorder.start(t0, Vec::new());
    let position = Position::new(12, 34);
    recorder.record(InputEvent::Move(position), t0 + ms(1));

    // When: A scroll without a position arrives
    recorder.record(
        InputEvent::Scroll {
            delta: ScrollDelta::new(0, -2),
            position: None,
        },
        t0 + ms(2),
    );

    // Then: The scroll uses the last move's position
    assert_eq!(
        recorder.log().last(),
        Some(&ActionRecord::Scroll {
            position,
            delta: ScrollDelta::new(0, -2),
            delay: ms(1),
        })
    );
}

/// WHAT: A click with no known position at all is dropped
/// WHY: Replaying it at an arbitrary position would click the wrong target
#[test]
fn given_no_position_anywhere_when_clicking_then_click_dropped() {
    // Given: A fresh recording
    let t0 = Instant::now();
    let mut recorder = Recorder::new();
    recorder.start(t0, Vec::new());

    // When: A click without position arrives
    let appended = recorder.record(
        InputEvent::Button {
            button: MouseButton::Right,
            pressed: true,
            position: None,
        },
        t0 + ms(1),
    );

    // Then: Nothing is recorded
    assert_eq!(appended, 0);
    assert!(recorder.log().is_empty());
}

/// WHAT: Events are ignored while idle
/// WHY: Only an active recording may mutate the log
#[test]
fn given_idle_recorder_when_event_arrives_then_ignored() {
    // Given: A recorder that never started
    let mut recorder = Recorder::new();

    // When: A move arrives
    let appended = recorder.record(InputEvent::Move(Position::new(5, 5)), Instant::now());

    // Then: Nothing happens and stop reports no recording
    assert_eq!(appended, 0);
    assert_eq!(recorder.stop(Instant::now()), None);
}

/// WHAT: Reset ends the recording and clears everything
/// WHY: Stop-execution returns the session to idle
#[test]
fn given_recording_when_reset_then_idle_and_empty() {
    // Given: An active recording with content
    let t0 = Instant::now();
    let mut recorder = Recorder::new();
    recorder.start(t0, Vec::new());
    recorder.record(InputEvent::Move(Position::new(5, 5)), t0 + ms(1));

    // When: Resetting
    recorder.reset();

    // Then: Idle with an empty log
    assert!(!recorder.is_recording());
    assert!(recorder.log().is_empty());
    assert!(recorder.session_id().is_none());
}
