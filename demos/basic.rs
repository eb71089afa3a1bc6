//! Basic Demo - Six-box OTP entry.
//!
//! Type digits to fill the boxes, Backspace to clear and step back,
//! Enter to "verify" (placeholder), Escape or Ctrl+C to exit.
//!
//! Run with: cargo run --example basic

use otp_entry::mount::{mount, run, unmount};

fn main() {
    match mount(6) {
        Ok(handle) => {
            let _ = run(&handle);
            unmount(handle);
        }
        Err(e) => {
            eprintln!("Failed to mount: {e}");
        }
    }
}
