//! Mount API - Application lifecycle and the render effect.
//!
//! Entry point for running the control in a terminal. Mounting initializes
//! the store and focus table, runs the first render pass (which populates
//! the focus table), issues the one-time initial focus command targeting
//! slot 0, and installs the render effect that re-renders whenever the
//! buffer or the focused slot changes.
//!
//! # Example
//!
//! ```ignore
//! use otp_entry::mount;
//!
//! let handle = mount::mount(6)?;
//! mount::run(&handle)?; // Blocks until Escape / Ctrl+C
//! mount::unmount(handle);
//! ```

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use spark_signals::effect;

use crate::entry;
use crate::render::Renderer;
use crate::state::keyboard::{self, InputEvent};
use crate::state::{focus, store};

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`] that allows unmounting.
pub struct MountHandle {
    stop_effect: Option<Box<dyn FnOnce()>>,
    running: Arc<AtomicBool>,
    renderer: Rc<RefCell<Renderer>>,
}

impl MountHandle {
    /// Stop the render effect and restore the terminal.
    pub fn unmount(mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(stop) = self.stop_effect.take() {
            stop();
        }

        let _ = self.renderer.borrow_mut().exit_fullscreen();
    }

    /// Check if still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the application (sets running to false).
    /// Use this to trigger graceful shutdown from custom code.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(stop) = self.stop_effect.take() {
            stop();
        }

        // Restore terminal on drop (best effort)
        let _ = self.renderer.borrow_mut().exit_fullscreen();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount the entry control with `slot_count` boxes.
///
/// Sets up, in order:
/// 1. store and focus table initialization,
/// 2. fullscreen terminal and the first render pass (populates the
///    focus table with every slot's handle),
/// 3. the one-time initial focus command targeting slot 0,
/// 4. the render effect observing the buffer and focused-slot signals.
///
/// Returns a [`MountHandle`] for cleanup.
pub fn mount(slot_count: usize) -> io::Result<MountHandle> {
    store::init_store(slot_count);
    focus::init_focus_table(slot_count);

    let renderer = Rc::new(RefCell::new(Renderer::new()));
    renderer.borrow_mut().enter_fullscreen()?;

    // First render pass: draws the empty control and registers handles.
    renderer
        .borrow_mut()
        .render(&store::buffer(), focus::focused_slot())?;

    // Initial focus command, outside the event-handler model.
    focus::focus(0);

    let running = Arc::new(AtomicBool::new(true));
    let running_for_effect = running.clone();
    let renderer_for_effect = renderer.clone();

    // The ONE render effect: reading the signals creates the dependencies.
    let stop = effect(move || {
        let buffer = store::buffer();
        let focused = focus::focused_slot();

        if !running_for_effect.load(Ordering::SeqCst) {
            return;
        }

        let _ = renderer_for_effect.borrow_mut().render(&buffer, focused);
    });

    Ok(MountHandle {
        stop_effect: Some(Box::new(stop)),
        running,
        renderer,
    })
}

/// Unmount and clean up.
pub fn unmount(handle: MountHandle) {
    handle.unmount();
}

// =============================================================================
// Event Loop
// =============================================================================

/// Run the event loop once (non-blocking).
///
/// Polls input with a short timeout (~60fps) and routes key presses through
/// the entry machine. Enter triggers the verify placeholder; Escape and
/// Ctrl+C request shutdown.
///
/// Returns `Ok(false)` if the application should stop running.
pub fn tick(handle: &MountHandle) -> io::Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    if let Some(event) = keyboard::poll_event(Duration::from_millis(16))? {
        match event {
            InputEvent::Key(key) if key.is_press() => match key.key.as_str() {
                "Escape" => handle.stop(),
                "c" if key.modifiers.ctrl => handle.stop(),
                "Enter" => {
                    entry::verify();
                }
                _ => entry::apply_keystroke(&key),
            },
            InputEvent::Resize(_, _) => {
                // Geometry is fixed; redraw onto the resized screen.
                handle
                    .renderer
                    .borrow_mut()
                    .render(&store::buffer(), focus::focused_slot())?;
            }
            _ => {}
        }
    }

    Ok(handle.is_running())
}

/// Run the event loop (blocking until stopped).
///
/// Blocks until Escape or Ctrl+C is pressed, or `handle.stop()` is called.
pub fn run(handle: &MountHandle) -> io::Result<()> {
    while tick(handle)? {
        // Continue processing events
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
