//! # otp-entry
//!
//! Segmented one-time-passcode (OTP) entry control for the terminal.
//!
//! A fixed-length row of single-character input boxes behaves, to the user,
//! as one logical numeric code field: typing a digit fills the focused box
//! and advances, Backspace clears and retreats.
//!
//! ## Architecture
//!
//! Two cooperating responsibilities drive the control:
//!
//! - the **state store** ([`state::store`]) owns the ordered sequence of
//!   slots (the code buffer) behind a reactive signal, and
//! - the **focus router** ([`state::focus`]) owns one handle per rendered
//!   box and moves input focus between them.
//!
//! Every keystroke reaches the control as two events in a fixed order: the
//! key-press fires *before* the element's value commit, the value-change
//! fires *after* it, against whichever slot is focused by then. The entry
//! machine ([`entry`]) keeps the two phases strictly separated so that
//! focus moves triggered by the first phase can never misdirect a character
//! written by the second.
//!
//! ## Modules
//!
//! - [`state`] - Reactive runtime state (store, focus, keyboard)
//! - [`entry`] - The per-slot entry state machine and keystroke driver
//! - [`render`] - Terminal renderer (boxes, label, verify control)
//! - [`mount`] - Application lifecycle (mount/tick/run/unmount)

pub mod entry;
pub mod mount;
pub mod render;
pub mod state;

// Re-export commonly used items
pub use entry::{apply_keystroke, on_key_down, on_value_change, verify};

pub use mount::{MountHandle, mount, run, tick, unmount};

pub use render::{Attr, Renderer};

pub use state::{
    // Store
    CodeBuffer, SlotState,
    // Focus
    SlotHandle,
    // Keyboard
    InputEvent, KeyState, KeyboardEvent, Modifiers,
};
