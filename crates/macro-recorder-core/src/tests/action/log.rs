use crate::{
    ActionLog, ActionRecord, KeyCode, MouseButton, Position, RecordOrigin, ScrollDelta,
};

use std::time::Duration;

fn move_to(x: i32, y: i32, delay_ms: u64) -> ActionRecord {
    ActionRecord::Move {
        position: Position::new(x, y),
        delay: Duration::from_millis(delay_ms),
    }
}

/// WHAT: Stream moves are stored but not displayed
/// WHY: The display list is a readable projection, not a dump of every move
#[test]
fn given_mixed_origins_when_pushing_then_display_skips_stream() {
    // Given: An empty log
    let mut log = ActionLog::new();

    // When: Pushing an anchor, two stream moves and a click
    log.push(move_to(1, 2, 1500), RecordOrigin::Anchor);
    log.push(move_to(1, 2, 0), RecordOrigin::Stream);
    log.push(move_to(3, 4, 20), RecordOrigin::Stream);
    log.push(
        ActionRecord::Click {
            position: Position::new(3, 4),
            button: MouseButton::Left,
            pressed: false,
            delay: Duration::from_millis(250),
        },
        RecordOrigin::Input,
    );

    // Then: Four records, two display lines
    assert_eq!(log.len(), 4);
    assert_eq!(
        log.display(),
        &[
            "First move to (1, 2), delay: 1.50s".to_string(),
            "Release Left at (3, 4), delay: 0.25s".to_string(),
        ]
    );
}

/// WHAT: Scroll and key lines follow the display format
/// WHY: Users read these lines to check what was captured
#[test]
fn given_scroll_and_key_when_pushing_then_lines_formatted() {
    let mut log = ActionLog::new();

    log.push(
        ActionRecord::Scroll {
            position: Position::new(9, 9),
            delta: ScrollDelta::new(1, -2),
            delay: Duration::from_millis(10),
        },
        RecordOrigin::Input,
    );
    log.push(move_to(9, 9, 0), RecordOrigin::Rehome);
    log.push(
        ActionRecord::Key {
            key: KeyCode::Char('a'),
            pressed: true,
            delay: Duration::ZERO,
        },
        RecordOrigin::Input,
    );

    assert_eq!(
        log.display(),
        &[
            "Scroll (1, -2) at (9, 9), delay: 0.01s".to_string(),
            "Move to (9, 9) before key, delay: 0.00s".to_string(),
            "Press 'a', delay: 0.00s".to_string(),
        ]
    );
}

/// WHAT: Total delay sums every record and snapshot preserves order
/// WHY: One replay pass lasts the sum of delays, in recorded order
#[test]
fn given_records_when_snapshotting_then_order_and_total_kept() {
    // Given: A log with three moves
    let mut log = ActionLog::new();
    log.push(move_to(0, 0, 100), RecordOrigin::Stream);
    log.push(move_to(1, 1, 200), RecordOrigin::Stream);
    log.push(move_to(2, 2, 300), RecordOrigin::Trailing);

    // When: Taking a snapshot
    let snapshot = log.snapshot();

    // Then: Same records, same order; total is the sum
    assert_eq!(&*snapshot, log.records());
    assert_eq!(log.total_delay(), Duration::from_millis(600));
}

/// WHAT: Clear empties records and display together
/// WHY: The projection must never outlive its records
#[test]
fn given_filled_log_when_clearing_then_both_empty() {
    let mut log = ActionLog::new();
    log.push(move_to(0, 0, 1), RecordOrigin::Anchor);

    log.clear();

    assert!(log.is_empty());
    assert!(log.display().is_empty());
    assert!(log.last().is_none());
}

/// WHAT: Recent display lines are the newest ones, oldest first
/// WHY: The tray shows only the tail of a long recording
#[test]
fn given_long_log_when_taking_recent_then_tail_in_order() {
    let mut log = ActionLog::new();
    for i in 0..5 {
        log.push(move_to(i, i, 0), RecordOrigin::Input);
    }

    let recent = log.recent_display(2);

    assert_eq!(
        recent,
        &[
            "Move to (3, 3), delay: 0.00s".to_string(),
            "Move to (4, 4), delay: 0.00s".to_string(),
        ]
    );
    assert_eq!(log.recent_display(10).len(), 5);
    assert!(ActionLog::new().recent_display(3).is_empty());
}
