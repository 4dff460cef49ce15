//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are diffed against the previous one and only changed cell runs are
//! written. The writer is generic so the byte stream can be inspected in tests.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    raw: bool,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            raw: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Whether `enter` has run without a matching `exit`
    pub fn is_active(&self) -> bool {
        self.raw
    }

    pub fn enter(&mut self, title: &str) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(terminal::SetTitle(title))?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.invalidate();
        Ok(())
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.raw {
            return Ok(());
        }
        self.raw = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        // Leave raw mode even if the escape codes could not be written.
        let flushed = self.flush_buf();
        terminal::disable_raw_mode()?;
        flushed
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers should keep one `FrameBuffer` and pass it in every frame.
    /// The renderer will diff against the previous frame and then swap buffers
    /// so the caller can reuse the old one without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        // Swap current into prev so next frame can diff without cloning.
        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for TerminalRenderer<W> {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut enc = CellEncoder::new(out);
    for y in 0..fb.height() {
        enc.span(fb, 0, y, fb.width())?;
    }
    enc.finish()
}

/// Encode only the cell runs that differ from `prev` into `out`.
///
/// Buffers of different sizes are encoded in full, row by row.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut enc = CellEncoder::new(out);
    for run in ChangedRuns::new(prev, next) {
        enc.span(next, run.x, run.y, run.len)?;
    }
    enc.finish()
}

/// Writes cells while tracking the active style, so unchanged styles are not resent
struct CellEncoder<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> CellEncoder<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn span(&mut self, fb: &FrameBuffer, x: u16, y: u16, len: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        for cx in x..x.saturating_add(len) {
            let cell = fb.get(cx, y).unwrap_or_default();
            if self.style != Some(cell.style) {
                self.set_style(cell.style)?;
            }
            self.out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn set_style(&mut self, style: CellStyle) -> Result<()> {
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        self.out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        if style.bold {
            self.out.queue(SetAttribute(Attribute::Bold))?;
        }
        self.style = Some(style);
        Ok(())
    }

    /// Reset attributes if anything was styled
    fn finish(self) -> Result<()> {
        if self.style.is_some() {
            self.out.queue(ResetColor)?;
            self.out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// A horizontal run of changed cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

/// Row-major iterator over maximal runs of cells that differ between two frames
struct ChangedRuns<'a> {
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    full: bool,
    x: u16,
    y: u16,
}

impl<'a> ChangedRuns<'a> {
    fn new(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> Self {
        Self {
            prev,
            next,
            full: prev.width() != next.width() || prev.height() != next.height(),
            x: 0,
            y: 0,
        }
    }

    fn dirty(&self, x: u16, y: u16) -> bool {
        self.full || self.prev.get(x, y) != self.next.get(x, y)
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let (w, h) = (self.next.width(), self.next.height());
        while self.y < h {
            while self.x < w && !self.dirty(self.x, self.y) {
                self.x += 1;
            }
            if self.x < w {
                let start = self.x;
                while self.x < w && self.dirty(self.x, self.y) {
                    self.x += 1;
                }
                return Some(Run {
                    x: start,
                    y: self.y,
                    len: self.x - start,
                });
            }
            self.x = 0;
            self.y += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printed(bytes: &[u8]) -> String {
        // Strip CSI sequences, leaving only printed glyphs
        let s = String::from_utf8_lossy(bytes);
        let mut out = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for c in chars.by_ref() {
                        if c.is_ascii_alphabetic() {
                            break;
                        }
                    }
                } else if chars.peek() == Some(&']') {
                    // OSC, terminated by BEL
                    for c in chars.by_ref() {
                        if c == '\x07' {
                            break;
                        }
                    }
                }
                continue;
            }
            out.push(c);
        }
        out
    }

    #[test]
    fn rgb_maps_to_truecolor() {
        assert_eq!(
            rgb_to_color(Rgb::new(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let x = CellStyle::default().into_cell('X');
        let a = FrameBuffer::new(5, 2);
        let mut b = FrameBuffer::new(5, 2);
        for cx in 1..=3 {
            b.set(cx, 0, x);
        }
        b.set(0, 1, x);
        b.set(4, 1, x);

        let runs: Vec<Run> = ChangedRuns::new(&a, &b).collect();
        assert_eq!(
            runs,
            vec![
                Run { x: 1, y: 0, len: 3 },
                Run { x: 0, y: 1, len: 1 },
                Run { x: 4, y: 1, len: 1 },
            ]
        );
    }

    #[test]
    fn size_change_marks_whole_rows() {
        let a = FrameBuffer::new(2, 2);
        let b = FrameBuffer::new(3, 2);
        let runs: Vec<Run> = ChangedRuns::new(&a, &b).collect();
        assert_eq!(
            runs,
            vec![Run { x: 0, y: 0, len: 3 }, Run { x: 0, y: 1, len: 3 }]
        );
    }

    #[test]
    fn full_encode_prints_every_cell() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.put_str(0, 0, "AB", Rgb::WHITE, false);
        fb.put_str(0, 1, "CD", Rgb::WHITE, false);
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        assert_eq!(printed(&out), "ABCD");
    }

    #[test]
    fn identical_frames_encode_nothing() {
        let fb = FrameBuffer::new(4, 2);
        let mut out = Vec::new();
        encode_diff_into(&fb, &fb.clone(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn draw_swap_sends_full_then_diff() {
        let mut r = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(0, 0, "abc", Rgb::WHITE, false);
        r.draw_swap(&mut fb).unwrap();
        assert_eq!(printed(r.writer()), "abc");

        // The caller gets the previous buffer back; redraw one cell
        fb.put_str(0, 0, "abc", Rgb::WHITE, false);
        fb.put_str(1, 0, "X", Rgb::WHITE, false);
        r.draw_swap(&mut fb).unwrap();
        assert_eq!(printed(r.writer()), "abcX");
    }

    #[test]
    fn resize_forces_full_redraw() {
        let mut r = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(1, 1);
        fb.put_str(0, 0, "a", Rgb::WHITE, false);
        r.draw_swap(&mut fb).unwrap();

        fb.resize(2, 1);
        fb.put_str(0, 0, "ab", Rgb::WHITE, false);
        r.draw_swap(&mut fb).unwrap();
        assert_eq!(printed(r.writer()), "aab");
    }

    #[test]
    fn exit_without_enter_is_a_no_op() {
        let mut r = TerminalRenderer::with_writer(Vec::new());
        assert!(!r.is_active());
        r.exit().unwrap();
        assert!(r.writer().is_empty());
    }
}
