//! State Module - Reactive runtime state for the entry control
//!
//! - **Store** - The code buffer and its copy-on-write commit point
//! - **Focus** - Focused-slot signal and the slot handle table
//! - **Keyboard** - Event types, crossterm conversion, polling

pub mod focus;
pub mod keyboard;
pub mod store;

pub use focus::SlotHandle;
pub use keyboard::{InputEvent, KeyState, KeyboardEvent, Modifiers};
pub use store::{CodeBuffer, SlotState};
