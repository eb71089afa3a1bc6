//! OTP State Store - The code buffer and its reactive commit point.
//!
//! Owns the ordered sequence of N single-character slots. [`CodeBuffer`] is
//! immutable: the only mutator is [`CodeBuffer::replace`], which returns a
//! full copy of the prior buffer with exactly one slot altered. Committing
//! that copy through the thread-local signal is what makes a keystroke
//! observable to the render effect - in-place mutation would be invisible
//! to change detection.
//!
//! # API
//!
//! - `init_store(n)` - fresh all-empty buffer of n slots
//! - `get(i)` / `replace(i, value)` - slot read / copy-on-write commit
//! - `buffer()` - current buffer snapshot (subscribes inside effects)
//! - `code()` - concatenated digits for the verification collaborator

use spark_signals::{Signal, signal};

/// Number of slots in the reference control.
pub const DEFAULT_SLOT_COUNT: usize = 6;

// =============================================================================
// SLOT STATE
// =============================================================================

/// One slot of the code buffer: empty or exactly one digit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlotState {
    #[default]
    Empty,
    Filled(char),
}

impl SlotState {
    /// Check if the slot holds no digit.
    pub fn is_empty(self) -> bool {
        self == SlotState::Empty
    }

    /// The held digit, if any.
    pub fn digit(self) -> Option<char> {
        match self {
            SlotState::Filled(d) => Some(d),
            SlotState::Empty => None,
        }
    }
}

// =============================================================================
// CODE BUFFER
// =============================================================================

/// Fixed-length ordered sequence of slot values.
///
/// The length never changes after construction and no slot ever holds more
/// than one character. All mutation goes through [`replace`](Self::replace).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBuffer {
    slots: Vec<SlotState>,
}

impl CodeBuffer {
    /// All-empty buffer of `len` slots.
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![SlotState::Empty; len],
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True for the degenerate zero-slot buffer.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Value of slot `index`. Out-of-range reads answer `Empty`.
    pub fn get(&self, index: usize) -> SlotState {
        self.slots.get(index).copied().unwrap_or_default()
    }

    /// Copy-on-write replace: a new buffer with exactly slot `index`
    /// altered and every other slot untouched.
    #[must_use]
    pub fn replace(&self, index: usize, value: SlotState) -> CodeBuffer {
        debug_assert!(index < self.slots.len(), "slot index out of range");
        let mut next = self.clone();
        if let Some(slot) = next.slots.get_mut(index) {
            *slot = value;
        }
        next
    }

    /// Concatenated digits of all filled slots, in order.
    pub fn code(&self) -> String {
        self.slots.iter().filter_map(|s| s.digit()).collect()
    }

    /// Check if every slot is filled.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| !s.is_empty())
    }
}

// =============================================================================
// REACTIVE STORE
// =============================================================================

thread_local! {
    static BUFFER: Signal<CodeBuffer> = signal(CodeBuffer::new(DEFAULT_SLOT_COUNT));
}

/// Replace the store contents with a fresh all-empty buffer of `len` slots.
pub fn init_store(len: usize) {
    BUFFER.with(|s| s.set(CodeBuffer::new(len)));
}

/// Current buffer snapshot.
pub fn buffer() -> CodeBuffer {
    BUFFER.with(|s| s.get())
}

/// Number of slots in the mounted control.
pub fn slot_count() -> usize {
    buffer().len()
}

/// Value of slot `index`.
pub fn get(index: usize) -> SlotState {
    buffer().get(index)
}

/// Commit a copy-on-write replacement of slot `index`.
pub fn replace(index: usize, value: SlotState) {
    let next = buffer().replace(index, value);
    BUFFER.with(|s| s.set(next));
}

/// Concatenated digits of the current buffer.
pub fn code() -> String {
    buffer().code()
}

/// Check if every slot of the current buffer is filled.
pub fn is_complete() -> bool {
    buffer().is_complete()
}

/// Reset store state (for testing).
pub fn reset_store(len: usize) {
    init_store(len);
}

// =============================================================================
// TESTS
// =============================================================================
