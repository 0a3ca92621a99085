use crate::{
    InputEvent, KeyCode, MouseButton, Position, ScrollDelta, capture::listener::translate,
};

use rdev::{Button, EventType, Key};

/// WHAT: Pointer moves update the tracked position
/// WHY: Clicks and scrolls carry the position the hook last saw
#[test]
fn given_mouse_move_when_translating_then_pointer_tracked() {
    // Given: No tracked pointer
    let mut pointer = None;

    // When: Translating a fractional move and then a click
    let moved = translate(&EventType::MouseMove { x: 10.4, y: 20.6 }, &mut pointer);
    let clicked = translate(&EventType::ButtonPress(Button::Left), &mut pointer);

    // Then: The move is rounded and the click reuses it
    assert_eq!(moved, Some(InputEvent::Move(Position::new(10, 21))));
    assert_eq!(
        clicked,
        Some(InputEvent::Button {
            button: MouseButton::Left,
            pressed: true,
            position: Some(Position::new(10, 21)),
        })
    );
}

/// WHAT: Wheel events become scroll deltas without a known pointer
/// WHY: The recorder decides how to resolve a missing position
#[test]
fn given_wheel_without_pointer_when_translating_then_position_none() {
    // Given: No tracked pointer
    let mut pointer = None;

    // When: Translating a wheel event
    let scrolled = translate(
        &EventType::Wheel {
            delta_x: 0,
            delta_y: -3,
        },
        &mut pointer,
    );

    // Then: Delta is kept, position unknown
    assert_eq!(
        scrolled,
        Some(InputEvent::Scroll {
            delta: ScrollDelta::new(0, -3),
            position: None,
        })
    );
}

/// WHAT: Keys map to logical key codes, left and right modifiers merge
/// WHY: Replay and trigger filtering work on logical keys
#[test]
fn given_raw_keys_when_translating_then_logical_codes() {
    let mut pointer = None;

    let cases = [
        (Key::KeyQ, KeyCode::Char('q')),
        (Key::Num7, KeyCode::Char('7')),
        (Key::F6, KeyCode::Function(6)),
        (Key::ControlRight, KeyCode::Control),
        (Key::ShiftLeft, KeyCode::Shift),
        (Key::BackQuote, KeyCode::Char('`')),
        (Key::Return, KeyCode::Enter),
    ];

    for (raw, expected) in cases {
        assert_eq!(
            translate(&EventType::KeyRelease(raw), &mut pointer),
            Some(InputEvent::Key {
                key: expected,
                pressed: false,
            })
        );
    }
}

/// WHAT: Unknown keys are kept but marked unmapped
/// WHY: They appear in the display list but are skipped on replay
#[test]
fn given_unknown_key_when_translating_then_unmapped() {
    let mut pointer = None;

    let event = translate(&EventType::KeyPress(Key::Unknown(999)), &mut pointer);

    match event {
        Some(InputEvent::Key { key, pressed }) => {
            assert!(pressed);
            assert!(!key.is_mapped());
        }
        other => unreachable!("unexpected translation: {:?}", other),
    }
}
