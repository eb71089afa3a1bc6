//! Focus Router - Focused-slot signal and the slot handle table.
//!
//! Owns one opaque handle per rendered input box and moves input focus
//! between them. Handles are only ever used to *command* focus (the render
//! effect parks the terminal cursor on the focused handle); slot values
//! live in the store and are never read back from an element.
//!
//! # API
//!
//! - `focused_slot()` - currently focused slot index (-1 if none)
//! - `focus(i)` - command focus to slot i (idempotent)
//! - `register_slot(i, handle)` - record a rendered element
//!
//! # Example
//!
//! ```ignore
//! use otp_entry::state::focus;
//!
//! focus::init_focus_table(6);
//! focus::focus(0);
//! assert!(focus::is_focused(0));
//! ```

use std::cell::RefCell;

use spark_signals::{Signal, signal};

/// Opaque handle to a rendered slot element: the terminal cell where the
/// slot's cursor sits. Never read for value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotHandle {
    pub x: u16,
    pub y: u16,
}

// =============================================================================
// FOCUSED SLOT SIGNAL
// =============================================================================

thread_local! {
    static FOCUSED_SLOT: Signal<i32> = signal(-1);
}

/// Get the currently focused slot index (-1 if none).
pub fn focused_slot() -> i32 {
    FOCUSED_SLOT.with(|s| s.get())
}

/// Check if any slot is focused.
pub fn has_focus() -> bool {
    focused_slot() >= 0
}

/// Check if a specific slot is focused.
pub fn is_focused(index: usize) -> bool {
    focused_slot() == index as i32
}

// =============================================================================
// FOCUS TABLE
// =============================================================================

thread_local! {
    static FOCUS_TABLE: RefCell<Vec<Option<SlotHandle>>> = RefCell::new(Vec::new());
}

/// Size the focus table for `len` slots and clear any stale handles.
/// Called once when the control mounts.
pub fn init_focus_table(len: usize) {
    FOCUS_TABLE.with(|table| {
        let mut table = table.borrow_mut();
        table.clear();
        table.resize(len, None);
    });
    FOCUSED_SLOT.with(|s| s.set(-1));
}

/// Record the rendered element for slot `index`. The first render pass
/// populates the table; later passes reassign on remount. Entries are never
/// removed while mounted.
pub fn register_slot(index: usize, handle: SlotHandle) {
    FOCUS_TABLE.with(|table| {
        let mut table = table.borrow_mut();
        if index >= table.len() {
            table.resize(index + 1, None);
        }
        table[index] = Some(handle);
    });
}

/// The recorded handle for slot `index`, if the slot has rendered.
pub fn handle_of(index: usize) -> Option<SlotHandle> {
    FOCUS_TABLE.with(|table| table.borrow().get(index).copied().flatten())
}

/// Number of slots the table is sized for.
pub fn table_len() -> usize {
    FOCUS_TABLE.with(|table| table.borrow().len())
}

// =============================================================================
// FOCUS COMMANDS
// =============================================================================

/// Command input focus to slot `index`. Side effect only: the focused-slot
/// signal changes and the render effect moves the terminal cursor.
/// Idempotent when `index` is already focused.
pub fn focus(index: usize) -> bool {
    if index >= table_len() {
        log::debug!("focus({index}) ignored: out of range");
        return false;
    }
    let current = focused_slot();
    if current == index as i32 {
        return true;
    }
    FOCUSED_SLOT.with(|s| s.set(index as i32));
    log::debug!("focus moved {current} -> {index}");
    true
}

/// Clear focus (no slot focused).
pub fn blur() {
    if has_focus() {
        FOCUSED_SLOT.with(|s| s.set(-1));
    }
}

/// Reset all focus state (for testing).
pub fn reset_focus_state(len: usize) {
    init_focus_table(len);
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset_focus_state(6);
    }

    #[test]
    fn test_initial_state() {
        setup();
        assert_eq!(focused_slot(), -1);
        assert!(!has_focus());
    }

    #[test]
    fn test_focus_slot() {
        setup();

        assert!(focus(0));
        assert_eq!(focused_slot(), 0);
        assert!(has_focus());
        assert!(is_focused(0));

        assert!(focus(3));
        assert!(is_focused(3));
        assert!(!is_focused(0));
    }

    #[test]
    fn test_focus_idempotent() {
        setup();

        assert!(focus(2));
        assert!(focus(2));
        assert_eq!(focused_slot(), 2);
    }

    #[test]
    fn test_focus_out_of_range() {
        setup();

        assert!(!focus(6));
        assert_eq!(focused_slot(), -1);
    }

    #[test]
    fn test_register_and_lookup_handles() {
        setup();

        assert_eq!(handle_of(2), None);

        register_slot(2, SlotHandle { x: 14, y: 4 });
        assert_eq!(handle_of(2), Some(SlotHandle { x: 14, y: 4 }));

        // Remount reassigns
        register_slot(2, SlotHandle { x: 20, y: 4 });
        assert_eq!(handle_of(2), Some(SlotHandle { x: 20, y: 4 }));
    }

    #[test]
    fn test_blur() {
        setup();

        focus(1);
        assert!(has_focus());

        blur();
        assert!(!has_focus());
        assert_eq!(focused_slot(), -1);
    }

    #[test]
    fn test_init_clears_handles_and_focus() {
        setup();

        register_slot(0, SlotHandle { x: 2, y: 4 });
        focus(0);

        init_focus_table(6);
        assert_eq!(handle_of(0), None);
        assert_eq!(focused_slot(), -1);
        assert_eq!(table_len(), 6);
    }
}
