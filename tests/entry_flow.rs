//! End-to-end keystroke scenarios for the entry control.
//!
//! Drives the real store and focus router through the keystroke driver,
//! terminal untouched. Each test sets up a freshly mounted six-slot
//! control: all slots empty, focus on slot 0.

use otp_entry::state::keyboard::KeyboardEvent;
use otp_entry::state::store::SlotState;
use otp_entry::state::{focus, store};
use otp_entry::{apply_keystroke, verify};

fn setup() {
    store::reset_store(6);
    focus::reset_focus_state(6);
    focus::focus(0);
}

fn type_key(key: &str) {
    apply_keystroke(&KeyboardEvent::new(key));
}

fn slots() -> Vec<Option<char>> {
    let buffer = store::buffer();
    (0..buffer.len()).map(|i| buffer.get(i).digit()).collect()
}

#[test]
fn type_then_retreat_with_backspace() {
    setup();

    // Type "1": slot 0 fills, focus advances.
    type_key("1");
    assert_eq!(slots(), [Some('1'), None, None, None, None, None]);
    assert_eq!(focus::focused_slot(), 1);

    // Type "2": slot 1 fills, focus advances.
    type_key("2");
    assert_eq!(slots(), [Some('1'), Some('2'), None, None, None, None]);
    assert_eq!(focus::focused_slot(), 2);

    // Backspace at focus=2 (slot 2 empty): slot 1 cleared, focus retreats.
    type_key("Backspace");
    assert_eq!(slots(), [Some('1'), None, None, None, None, None]);
    assert_eq!(focus::focused_slot(), 1);

    // Backspace at focus=1 (slot 1 empty): slot 0 cleared, focus retreats.
    type_key("Backspace");
    assert_eq!(slots(), [None, None, None, None, None, None]);
    assert_eq!(focus::focused_slot(), 0);

    // Backspace at focus=0 (slot 0 empty): no change at the boundary.
    type_key("Backspace");
    assert_eq!(slots(), [None, None, None, None, None, None]);
    assert_eq!(focus::focused_slot(), 0);
}

#[test]
fn two_presses_to_retreat_over_a_filled_box() {
    setup();

    type_key("1");
    type_key("2");
    focus::focus(1); // stand on the filled slot 1

    // First press clears in place, focus stays.
    type_key("Backspace");
    assert_eq!(slots(), [Some('1'), None, None, None, None, None]);
    assert_eq!(focus::focused_slot(), 1);

    // Second press (slot now empty) clears slot 0 and steps back into it.
    type_key("Backspace");
    assert_eq!(slots(), [None, None, None, None, None, None]);
    assert_eq!(focus::focused_slot(), 0);
}

#[test]
fn overwrite_a_filled_slot() {
    setup();

    // Fill slot 3 with "9", then come back and type "5" over it.
    focus::focus(3);
    type_key("9");
    assert_eq!(store::get(3), SlotState::Filled('9'));

    focus::focus(3);
    type_key("5");
    assert_eq!(store::get(3), SlotState::Filled('5'));
    assert_eq!(focus::focused_slot(), 4);
}

#[test]
fn invalid_input_leaves_everything_unchanged() {
    setup();

    type_key("1");
    let before = slots();
    let focused_before = focus::focused_slot();

    for key in ["a", "Z", " ", "ArrowUp", "Tab", "Delete", "."] {
        type_key(key);
        assert_eq!(slots(), before, "state changed for key {key:?}");
        assert_eq!(focus::focused_slot(), focused_before);
    }
}

#[test]
fn last_slot_accepts_without_advancing() {
    setup();

    for key in ["3", "1", "4", "1", "5", "9"] {
        type_key(key);
    }
    assert_eq!(store::code(), "314159");
    assert!(store::is_complete());
    // No focus command was issued past the last slot.
    assert_eq!(focus::focused_slot(), 5);

    // The control is stateless across completion: more input still lands.
    type_key("2");
    assert_eq!(store::code(), "314152");
}

#[test]
fn verify_is_a_read_only_placeholder() {
    setup();

    type_key("8");
    type_key("8");

    let code = verify();
    assert_eq!(code, "88");
    // Verify consumed nothing: buffer and focus are as they were.
    assert_eq!(slots(), [Some('8'), Some('8'), None, None, None, None]);
    assert_eq!(focus::focused_slot(), 2);
}

#[test]
fn four_slot_control_honors_its_length() {
    store::reset_store(4);
    focus::reset_focus_state(4);
    focus::focus(0);

    for key in ["1", "2", "3", "4"] {
        type_key(key);
    }
    assert_eq!(store::code(), "1234");
    assert_eq!(focus::focused_slot(), 3);
    assert_eq!(store::slot_count(), 4);
}
