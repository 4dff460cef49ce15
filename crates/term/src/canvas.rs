//! Sprite and label drawing onto a framebuffer.

use crate::assets::{BlockFont, Frame, Texture};
use crate::fb::{FrameBuffer, Rgb};
use crate::projection::CellRect;

/// Character size from which labels switch to the block font
pub const BANNER_SIZE: u16 = 100;

/// Stretch one texture frame over `rect`
///
/// Transparent textures only paint their non-space glyphs and keep the
/// background already in the buffer; opaque ones paint every cell.
pub fn draw_texture(fb: &mut FrameBuffer, tex: &Texture, frame: usize, rect: CellRect) {
    let art = tex.frame(frame);
    let style = tex.style();
    for dy in 0..rect.h {
        let y = rect.y + dy;
        if y < 0 || y >= fb.height() as i32 {
            continue;
        }
        for dx in 0..rect.w {
            let x = rect.x + dx;
            if x < 0 || x >= fb.width() as i32 {
                continue;
            }
            let ch = art.sample(dx, dy, rect.w, rect.h);
            if tex.opaque() {
                fb.set(x, y, style.into_cell(ch));
            } else if ch != ' ' {
                fb.overlay(x, y, ch, style.fg, style.bold);
            }
        }
    }
}

/// A line of text placed at a cell position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label<'a> {
    pub text: &'a str,
    pub x: i32,
    pub y: i32,
    pub size: u16,
    pub color: Rgb,
}

impl<'a> Label<'a> {
    pub fn new(text: &'a str, x: i32, y: i32, size: u16, color: Rgb) -> Self {
        Self {
            text,
            x,
            y,
            size,
            color,
        }
    }

    pub fn is_banner(&self) -> bool {
        self.size >= BANNER_SIZE
    }

    /// Draw plain or in block letters, depending on size
    pub fn draw(&self, fb: &mut FrameBuffer, font: &BlockFont) {
        if self.is_banner() {
            draw_banner(fb, font, self.text, self.x, self.y, self.color);
        } else {
            fb.put_str(self.x, self.y, self.text, self.color, true);
        }
    }
}

fn draw_banner(fb: &mut FrameBuffer, font: &BlockFont, text: &str, x: i32, y: i32, color: Rgb) {
    let mut pen = x;
    for ch in text.chars() {
        if let Some(glyph) = font.glyph(ch) {
            draw_glyph(fb, glyph, pen, y, color);
        }
        pen += font.advance(ch) as i32;
        if pen >= fb.width() as i32 {
            break;
        }
    }
}

fn draw_glyph(fb: &mut FrameBuffer, glyph: &Frame, x: i32, y: i32, color: Rgb) {
    for gy in 0..glyph.height() {
        for gx in 0..glyph.width() {
            let ch = glyph.glyph(gx, gy);
            if ch != ' ' {
                fb.overlay(x + gx as i32, y + gy as i32, ch, color, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::CellStyle;
    use std::path::Path;

    fn tex(src: &str) -> Texture {
        Texture::parse(src, Path::new("t.txt")).unwrap()
    }

    #[test]
    fn transparent_texture_keeps_background() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.clear(CellStyle::default().into_cell('.'));
        draw_texture(&mut fb, &tex("# #\n"), 0, CellRect { x: 0, y: 0, w: 3, h: 1 });
        assert_eq!(fb.row_text(0), "#.#");
    }

    #[test]
    fn opaque_texture_paints_everything() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.clear(CellStyle::default().into_cell('.'));
        let t = tex("@opaque\n@bg 1 2 3\n# #\n");
        draw_texture(&mut fb, &t, 0, CellRect { x: 0, y: 0, w: 3, h: 1 });
        assert_eq!(fb.row_text(0), "# #");
        assert_eq!(fb.get(1, 0).unwrap().style.bg, Rgb::new(1, 2, 3));
    }

    #[test]
    fn texture_clips_off_screen() {
        let mut fb = FrameBuffer::new(4, 2);
        draw_texture(&mut fb, &tex("@opaque\nAB\n"), 0, CellRect { x: -1, y: 1, w: 2, h: 4 });
        assert_eq!(fb.row_text(0), "    ");
        assert_eq!(fb.row_text(1), "B   ");
    }

    #[test]
    fn small_label_is_plain_text() {
        let font = BlockFont::parse("@glyph A\n##\n##\n", Path::new("f.txt")).unwrap();
        let mut fb = FrameBuffer::new(8, 2);
        Label::new("A1", 1, 0, 40, Rgb::GREEN).draw(&mut fb, &font);
        assert_eq!(fb.row_text(0), " A1     ");
        assert_eq!(fb.get(1, 0).unwrap().style.fg, Rgb::GREEN);
    }

    #[test]
    fn banner_label_uses_block_font() {
        let font = BlockFont::parse("@glyph A\n#.\n.#\n", Path::new("f.txt")).unwrap();
        let mut fb = FrameBuffer::new(8, 2);
        // 'a' uses the uppercase glyph; '?' is a two-column gap plus spacing
        Label::new("a?A", 0, 0, 150, Rgb::RED).draw(&mut fb, &font);
        assert_eq!(fb.row_text(0), "#.    #.");
        assert_eq!(fb.row_text(1), ".#    .#");
        assert_eq!(fb.get(0, 0).unwrap().style.fg, Rgb::RED);
    }
}
