//! Entry Machine - The two keystroke phases and the glue between them.
//!
//! The platform delivers every keystroke as two events in a fixed order:
//!
//! 1. the **key-press** event, before the element's value commit, and
//! 2. the **value-change** event, after it, carrying the post-keystroke
//!    element value - dispatched against whichever slot is focused *at that
//!    point*, which may already have moved if the key-press phase routed
//!    focus.
//!
//! The two handlers are therefore specified independently. [`on_key_down`]
//! is consulted only for deletion/navigation intent and never reads the
//! keystroke's character (it is not committed yet). [`on_value_change`] is
//! the only place a character is ever written, because its payload is the
//! only one that reflects the post-keystroke value. A key-press handler
//! that both moved focus and wrote a value would misdirect the character
//! into the newly focused slot; keeping the write out of that phase is what
//! makes the early focus move harmless.
//!
//! Per-slot state machine:
//!
//! ```text
//! Empty  --[digit via value-change]--> Filled(d); focus(next)
//! Filled --[digit via value-change]--> Filled(d'); focus(next)   overwrite
//! Filled --[Backspace via key-press]--> Empty; focus(self)
//! Empty  --[Backspace via key-press, i > 0]--> slot i-1 Empty; focus(i-1)
//! ```

use crate::state::keyboard::KeyboardEvent;
use crate::state::store::SlotState;
use crate::state::{focus, store};

// =============================================================================
// KEY-PRESS PHASE
// =============================================================================

/// Key-press phase: deletion and backward navigation only.
///
/// Backspace on a filled slot clears it in place and re-affirms focus, so a
/// second press (now on an empty slot) clears the previous slot and steps
/// back into it. Retreating one box costs two presses: deleting and moving
/// never happen on the same keystroke, so this phase never needs to know
/// the outcome of the value commit that follows it.
///
/// Every other key is ignored here and left to the value-change phase.
pub fn on_key_down(index: usize, event: &KeyboardEvent) {
    if !event.is_press() || event.key != "Backspace" {
        return;
    }

    match store::get(index) {
        SlotState::Filled(_) => {
            store::replace(index, SlotState::Empty);
            focus::focus(index);
        }
        SlotState::Empty if index > 0 => {
            store::replace(index - 1, SlotState::Empty);
            focus::focus(index - 1);
        }
        SlotState::Empty => {} // slot 0: nowhere to step back to
    }
}

// =============================================================================
// VALUE-CHANGE PHASE
// =============================================================================

/// Value-commit phase: accepts exactly one decimal digit.
///
/// Anything else - empty string from a platform-level rejection, non-digit,
/// multi-character input - is dropped silently: no state change, no focus
/// change. On acceptance the slot is replaced (overwriting any prior digit)
/// and focus advances, except at the last slot.
pub fn on_value_change(index: usize, raw: &str) {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(digit), None) if digit.is_ascii_digit() => {
            store::replace(index, SlotState::Filled(digit));
            if index + 1 < store::slot_count() {
                focus::focus(index + 1);
            }
        }
        _ => {
            log::debug!("value change rejected at slot {index}: {raw:?}");
        }
    }
}

// =============================================================================
// KEYSTROKE DRIVER
// =============================================================================

/// Tentative post-edit value of a single-character input element for this
/// keystroke, or `None` when the key produces no value edit. A printable
/// character replaces the element's single character outright; control
/// chords and named keys edit nothing.
fn pending_value(event: &KeyboardEvent) -> Option<String> {
    if !event.is_press() || event.modifiers.ctrl || event.modifiers.alt {
        return None;
    }
    let mut chars = event.key.chars();
    match (chars.next(), chars.next()) {
        (Some(_), None) => Some(event.key.clone()),
        _ => None,
    }
}

/// Feed one keystroke through the per-keystroke platform contract:
/// key-press first, then the value edit against whichever slot holds focus
/// once the key-press phase has run.
pub fn apply_keystroke(event: &KeyboardEvent) {
    let focused = focus::focused_slot();
    if focused < 0 {
        return;
    }
    on_key_down(focused as usize, event);

    if let Some(raw) = pending_value(event) {
        // Focus may have moved above; the value commit lands on the slot
        // that is focused now, exactly as the platform would deliver it.
        let target = focus::focused_slot();
        if target >= 0 {
            on_value_change(target as usize, &raw);
        }
    }
}

// =============================================================================
// VERIFY PLACEHOLDER
// =============================================================================

/// Placeholder for the external verification collaborator. Reads the final
/// code as a concatenated string; performs no validation or submission.
pub fn verify() -> String {
    let code = store::code();
    log::debug!(
        "verify: {} of {} digits entered",
        code.len(),
        store::slot_count()
    );
    code
}

// =============================================================================
// TESTS
// =============================================================================
