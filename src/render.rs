//! Renderer - Draws the entry control and parks the cursor.
//!
//! Full redraw per frame: the control is a handful of cells, so no diff
//! layer is carried. Each pass draws the label, the row of boxes and the
//! verify control, records every slot's [`SlotHandle`] in the focus table
//! (the first pass populates it, later passes reassign), and finally moves
//! the hardware cursor onto the focused slot's cell - that cursor move is
//! the observable side of a `focus(i)` command.
//!
//! ```text
//! Enter 6 digit OTP
//!
//! ┌───┐ ┌───┐ ┌───┐ ┌───┐ ┌───┐ ┌───┐
//! │ 1 │ │ 2 │ │   │ │   │ │   │ │   │
//! └───┘ └───┘ └───┘ └───┘ └───┘ └───┘
//!
//! [ Verify ]
//! ```

use std::io::{self, Stdout, Write, stdout};

use crossterm::cursor;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};

use crate::state::focus::{self, SlotHandle};
use crate::state::store::CodeBuffer;

// =============================================================================
// CELL ATTRIBUTES
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for cheap combination and comparison.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const UNDERLINE = 1 << 2;
        const INVERSE = 1 << 3;
    }
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Outer width of one slot box, borders included.
const BOX_WIDTH: u16 = 5;
/// Gap between adjacent boxes.
const BOX_GAP: u16 = 1;
/// Top-left corner of the control.
const ORIGIN: (u16, u16) = (2, 1);

/// Top-left corner of slot `index`'s box.
fn box_origin(index: usize) -> (u16, u16) {
    let (ox, oy) = ORIGIN;
    (ox + index as u16 * (BOX_WIDTH + BOX_GAP), oy + 2)
}

/// The cell inside slot `index`'s box where its digit (and cursor) sits.
fn digit_cell(index: usize) -> (u16, u16) {
    let (x, y) = box_origin(index);
    (x + 2, y + 1)
}

// =============================================================================
// RENDERER
// =============================================================================

/// Terminal renderer for the entry control.
pub struct Renderer {
    out: Stdout,
}

impl Renderer {
    /// Create a renderer over stdout.
    pub fn new() -> Self {
        Self { out: stdout() }
    }

    /// Enter fullscreen mode (raw mode + alternate screen buffer).
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        queue!(self.out, EnterAlternateScreen, Clear(ClearType::All))?;
        self.out.flush()
    }

    /// Exit fullscreen mode, restoring the terminal.
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            cursor::Show,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        disable_raw_mode()
    }

    /// Render one frame and register every slot's handle.
    pub fn render(&mut self, buffer: &CodeBuffer, focused: i32) -> io::Result<()> {
        let (ox, oy) = ORIGIN;

        queue!(self.out, cursor::Hide, Clear(ClearType::All))?;

        let label = format!("Enter {} digit OTP", buffer.len());
        self.draw_text(ox, oy, &label, Attr::BOLD)?;

        for index in 0..buffer.len() {
            let attrs = if focused == index as i32 {
                Attr::BOLD
            } else if buffer.get(index).is_empty() {
                Attr::DIM
            } else {
                Attr::NONE
            };
            self.draw_slot_box(index, attrs)?;

            let glyph = buffer.get(index).digit().unwrap_or(' ');
            let (dx, dy) = digit_cell(index);
            self.draw_text(dx, dy, &glyph.to_string(), attrs)?;

            let (hx, hy) = digit_cell(index);
            focus::register_slot(index, SlotHandle { x: hx, y: hy });
        }

        let verify_attrs = if buffer.is_complete() {
            Attr::BOLD | Attr::INVERSE
        } else {
            Attr::DIM
        };
        self.draw_text(ox, oy + 6, "[ Verify ]", verify_attrs)?;

        // Park the hardware cursor on the focused slot.
        if focused >= 0
            && let Some(handle) = focus::handle_of(focused as usize)
        {
            queue!(self.out, cursor::MoveTo(handle.x, handle.y), cursor::Show)?;
        }

        self.out.flush()
    }

    fn draw_slot_box(&mut self, index: usize, attrs: Attr) -> io::Result<()> {
        let (x, y) = box_origin(index);
        self.draw_text(x, y, "┌───┐", attrs)?;
        self.draw_text(x, y + 1, "│   │", attrs)?;
        self.draw_text(x, y + 2, "└───┘", attrs)
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str, attrs: Attr) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(x, y))?;
        apply_attrs(&mut self.out, attrs)?;
        queue!(self.out, Print(text), SetAttribute(Attribute::Reset))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate an [`Attr`] bitfield into crossterm attribute commands.
fn apply_attrs(out: &mut impl Write, attrs: Attr) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset))?;
    if attrs.contains(Attr::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if attrs.contains(Attr::DIM) {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if attrs.contains(Attr::UNDERLINE) {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if attrs.contains(Attr::INVERSE) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_combination() {
        let attrs = Attr::BOLD | Attr::INVERSE;
        assert!(attrs.contains(Attr::BOLD));
        assert!(attrs.contains(Attr::INVERSE));
        assert!(!attrs.contains(Attr::DIM));
        assert_eq!(Attr::default(), Attr::NONE);
    }

    #[test]
    fn test_boxes_do_not_overlap() {
        for i in 0..5 {
            let (x, _) = box_origin(i);
            let (next_x, _) = box_origin(i + 1);
            assert!(x + BOX_WIDTH <= next_x);
        }
    }

    #[test]
    fn test_digit_cell_inside_box() {
        for i in 0..6 {
            let (bx, by) = box_origin(i);
            let (dx, dy) = digit_cell(i);
            assert!(dx > bx && dx < bx + BOX_WIDTH - 1);
            assert_eq!(dy, by + 1);
        }
    }

    #[test]
    fn test_apply_attrs_writes_sequences() {
        let mut sink: Vec<u8> = Vec::new();
        apply_attrs(&mut sink, Attr::BOLD | Attr::DIM).unwrap();
        assert!(!sink.is_empty());
    }
}
