//! Text-art assets: sprite textures and the banner font.
//!
//! Assets are plain text files loaded once at startup. A texture file is art
//! lines plus a few directives:
//!
//! ```text
//! @fg 255 220 0     foreground color
//! @bg 90 160 220    background color (used when opaque)
//! @opaque           spaces paint the background instead of being see-through
//! @frame            start another animation frame
//! ```
//!
//! A font file is a list of `@glyph C` headers, each followed by that glyph's
//! rows. Every glyph must be as tall as the first one.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::fb::{CellStyle, Rgb};
use crate::types::{FLAP_ROTATION, MAX_ROTATION};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("asset {path} has an empty frame or glyph")]
    Empty { path: PathBuf },
}

/// A rectangular grid of glyphs, padded with spaces to its widest row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    glyphs: Vec<char>,
}

impl Frame {
    fn from_rows(rows: &[&str]) -> Option<Self> {
        let mut rows = rows;
        while let Some((last, rest)) = rows.split_last() {
            if !last.is_empty() {
                break;
            }
            rows = rest;
        }
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        if width == 0 {
            return None;
        }

        let mut glyphs = Vec::with_capacity(width * rows.len());
        for row in rows {
            let mut n = 0;
            for ch in row.chars() {
                glyphs.push(ch);
                n += 1;
            }
            glyphs.extend(std::iter::repeat(' ').take(width - n));
        }

        Some(Self {
            width: width as u16,
            height: rows.len() as u16,
            glyphs,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn glyph(&self, x: u16, y: u16) -> char {
        if x >= self.width || y >= self.height {
            return ' ';
        }
        self.glyphs[y as usize * self.width as usize + x as usize]
    }

    /// Nearest-neighbour sample for a destination of `dest_w` x `dest_h` cells
    pub fn sample(&self, dx: i32, dy: i32, dest_w: i32, dest_h: i32) -> char {
        if dest_w <= 0 || dest_h <= 0 {
            return ' ';
        }
        let sx = (dx as i64 * self.width as i64 / dest_w as i64) as u16;
        let sy = (dy as i64 * self.height as i64 / dest_h as i64) as u16;
        self.glyph(sx, sy)
    }
}

/// A sprite: one or more frames sharing a style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    frames: Vec<Frame>,
    style: CellStyle,
    opaque: bool,
}

impl Texture {
    /// Parse texture source; `path` is only used in error messages
    pub fn parse(src: &str, path: &Path) -> Result<Self, AssetError> {
        let mut style = CellStyle::default();
        let mut opaque = false;
        let mut frames = Vec::new();
        let mut rows: Vec<&str> = Vec::new();

        for (n, line) in src.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            let Some(directive) = line.strip_prefix('@') else {
                rows.push(line);
                continue;
            };

            let mut parts = directive.split_whitespace();
            match parts.next() {
                Some("fg") => style.fg = parse_rgb(parts, path, n + 1)?,
                Some("bg") => style.bg = parse_rgb(parts, path, n + 1)?,
                Some("opaque") => opaque = true,
                Some("frame") => {
                    // A leading @frame before any art just opens the first frame.
                    if !rows.is_empty() || !frames.is_empty() {
                        frames.push(finish_frame(&rows, path)?);
                        rows.clear();
                    }
                }
                other => {
                    return Err(AssetError::Parse {
                        path: path.to_path_buf(),
                        line: n + 1,
                        message: format!("unknown directive @{}", other.unwrap_or("")),
                    })
                }
            }
        }
        frames.push(finish_frame(&rows, path)?);

        Ok(Self {
            frames,
            style,
            opaque,
        })
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        Self::parse(&read(path)?, path)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> &Frame {
        &self.frames[index.min(self.frames.len() - 1)]
    }

    pub fn style(&self) -> CellStyle {
        self.style
    }

    pub fn opaque(&self) -> bool {
        self.opaque
    }

    /// Pick the frame for a tilt angle, spreading `FLAP_ROTATION..=MAX_ROTATION` over all frames
    pub fn frame_for_rotation(&self, degrees: i32) -> usize {
        let n = self.frames.len() as i32;
        let span = MAX_ROTATION - FLAP_ROTATION;
        let t = degrees.clamp(FLAP_ROTATION, MAX_ROTATION) - FLAP_ROTATION;
        ((t * n) / (span + 1)) as usize
    }
}

fn finish_frame(rows: &[&str], path: &Path) -> Result<Frame, AssetError> {
    Frame::from_rows(rows).ok_or_else(|| AssetError::Empty {
        path: path.to_path_buf(),
    })
}

fn parse_rgb<'a>(
    mut parts: impl Iterator<Item = &'a str>,
    path: &Path,
    line: usize,
) -> Result<Rgb, AssetError> {
    let mut channel = || -> Result<u8, AssetError> {
        parts
            .next()
            .and_then(|p| p.parse::<u8>().ok())
            .ok_or_else(|| AssetError::Parse {
                path: path.to_path_buf(),
                line,
                message: "expected three color channels 0-255".to_string(),
            })
    };
    Ok(Rgb::new(channel()?, channel()?, channel()?))
}

fn read(path: &Path) -> Result<String, AssetError> {
    fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Block-letter font for large labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFont {
    height: u16,
    glyphs: HashMap<char, Frame>,
}

impl BlockFont {
    /// Space between glyphs, in cells
    pub const SPACING: u16 = 1;

    pub fn parse(src: &str, path: &Path) -> Result<Self, AssetError> {
        let mut glyphs = HashMap::new();
        let mut height: Option<u16> = None;
        let mut current: Option<(char, usize)> = None;
        let mut rows: Vec<&str> = Vec::new();

        let mut finish = |key: Option<(char, usize)>,
                          rows: &[&str],
                          glyphs: &mut HashMap<char, Frame>|
         -> Result<(), AssetError> {
            let Some((ch, line)) = key else {
                return Ok(());
            };
            let frame = finish_frame(rows, path)?;
            let expected = *height.get_or_insert(frame.height());
            if frame.height() != expected {
                return Err(AssetError::Parse {
                    path: path.to_path_buf(),
                    line,
                    message: format!(
                        "glyph {:?} is {} rows tall, expected {}",
                        ch,
                        frame.height(),
                        expected
                    ),
                });
            }
            glyphs.insert(ch, frame);
            Ok(())
        };

        for (n, line) in src.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if let Some(name) = line.strip_prefix("@glyph") {
                finish(current.take(), &rows, &mut glyphs)?;
                rows.clear();
                let name = name.trim();
                let ch = match name {
                    "space" => ' ',
                    _ if name.chars().count() == 1 => name.chars().next().unwrap_or(' '),
                    _ => {
                        return Err(AssetError::Parse {
                            path: path.to_path_buf(),
                            line: n + 1,
                            message: format!("@glyph expects one character, got {:?}", name),
                        })
                    }
                };
                current = Some((ch, n + 1));
            } else if current.is_some() {
                rows.push(line);
            } else if !line.trim().is_empty() {
                return Err(AssetError::Parse {
                    path: path.to_path_buf(),
                    line: n + 1,
                    message: "art before the first @glyph".to_string(),
                });
            }
        }
        finish(current.take(), &rows, &mut glyphs)?;

        drop(finish);
        let height = height.ok_or_else(|| AssetError::Empty {
            path: path.to_path_buf(),
        })?;
        Ok(Self { height, glyphs })
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        Self::parse(&read(path)?, path)
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Glyph for `ch`; lowercase falls back to uppercase
    pub fn glyph(&self, ch: char) -> Option<&Frame> {
        self.glyphs
            .get(&ch)
            .or_else(|| self.glyphs.get(&ch.to_ascii_uppercase()))
    }

    /// Advance for `ch`; unknown characters take the width of a square blank
    pub fn advance(&self, ch: char) -> u16 {
        self.glyph(ch).map(Frame::width).unwrap_or(self.height) + Self::SPACING
    }

    /// Total width of `text` in cells (without trailing spacing)
    pub fn measure(&self, text: &str) -> u16 {
        let total: u16 = text.chars().map(|c| self.advance(c)).sum();
        total.saturating_sub(Self::SPACING)
    }
}

/// Every asset the game draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPack {
    pub background: Texture,
    pub player: Texture,
    pub gate_body: Texture,
    pub gate_cap: Texture,
    pub floor: Texture,
    pub font: BlockFont,
}

impl AssetPack {
    pub const BACKGROUND: &'static str = "background.txt";
    pub const PLAYER: &'static str = "birb.txt";
    pub const GATE_BODY: &'static str = "pipe_body.txt";
    pub const GATE_CAP: &'static str = "pipe_top.txt";
    pub const FLOOR: &'static str = "floor.txt";
    pub const FONT: &'static str = "font.txt";

    /// Load all assets from `dir`; the first failure aborts
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        Ok(Self {
            background: Texture::load(&dir.join(Self::BACKGROUND))?,
            player: Texture::load(&dir.join(Self::PLAYER))?,
            gate_body: Texture::load(&dir.join(Self::GATE_BODY))?,
            gate_cap: Texture::load(&dir.join(Self::GATE_CAP))?,
            floor: Texture::load(&dir.join(Self::FLOOR))?,
            font: BlockFont::load(&dir.join(Self::FONT))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> &'static Path {
        Path::new("test.txt")
    }

    #[test]
    fn texture_pads_ragged_rows() {
        let tex = Texture::parse("ab\nabcd\n", p()).unwrap();
        let f = tex.frame(0);
        assert_eq!((f.width(), f.height()), (4, 2));
        assert_eq!(f.glyph(3, 0), ' ');
        assert_eq!(f.glyph(3, 1), 'd');
        assert!(!tex.opaque());
    }

    #[test]
    fn texture_directives() {
        let src = "@fg 1 2 3\n@bg 4 5 6\n@opaque\n##\n@frame\n%%\n%%\n";
        let tex = Texture::parse(src, p()).unwrap();
        assert_eq!(tex.style().fg, Rgb::new(1, 2, 3));
        assert_eq!(tex.style().bg, Rgb::new(4, 5, 6));
        assert!(tex.opaque());
        assert_eq!(tex.frame_count(), 2);
        assert_eq!(tex.frame(1).height(), 2);
        // Out-of-range frame index clamps to the last frame
        assert_eq!(tex.frame(9).glyph(0, 0), '%');
    }

    #[test]
    fn leading_frame_directive_is_not_an_empty_frame() {
        let tex = Texture::parse("@frame\nA\n@frame\nB\n", p()).unwrap();
        assert_eq!(tex.frame_count(), 2);
    }

    #[test]
    fn empty_texture_is_an_error() {
        assert!(matches!(
            Texture::parse("@fg 1 1 1\n\n", p()),
            Err(AssetError::Empty { .. })
        ));
    }

    #[test]
    fn bad_directive_reports_line() {
        let err = Texture::parse("AB\n@sparkle\n", p()).unwrap_err();
        match err {
            AssetError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(Texture::parse("@fg 1 2\nA\n", p()).is_err());
        assert!(Texture::parse("@fg 1 2 300\nA\n", p()).is_err());
    }

    #[test]
    fn sample_stretches_nearest_neighbour() {
        let tex = Texture::parse("ab\n", p()).unwrap();
        let f = tex.frame(0);
        let row: String = (0..4).map(|x| f.sample(x, 0, 4, 1)).collect();
        assert_eq!(row, "aabb");
        let shrunk: String = (0..1).map(|x| f.sample(x, 0, 1, 1)).collect();
        assert_eq!(shrunk, "a");
    }

    #[test]
    fn rotation_spreads_over_frames() {
        let tex = Texture::parse("A\n@frame\nB\n@frame\nC\n", p()).unwrap();
        assert_eq!(tex.frame_for_rotation(FLAP_ROTATION), 0);
        assert_eq!(tex.frame_for_rotation(0), 0);
        assert_eq!(tex.frame_for_rotation(30), 1);
        assert_eq!(tex.frame_for_rotation(MAX_ROTATION), 2);
        assert_eq!(tex.frame_for_rotation(500), 2);

        let single = Texture::parse("A\n", p()).unwrap();
        assert_eq!(single.frame_for_rotation(MAX_ROTATION), 0);
    }

    #[test]
    fn font_parses_glyphs() {
        let src = "@glyph A\n.#.\n#.#\n@glyph space\n \n \n@glyph 1\n#\n#\n";
        let font = BlockFont::parse(src, p()).unwrap();
        assert_eq!(font.height(), 2);
        assert_eq!(font.glyph('A').unwrap().width(), 3);
        assert_eq!(font.glyph('a').unwrap().width(), 3);
        assert!(font.glyph(' ').is_some());
        assert!(font.glyph('Z').is_none());
        // A(3) + 1 + 1(1) = 5
        assert_eq!(font.measure("A1"), 5);
        // Unknown glyph advances by the font height
        assert_eq!(font.measure("Z"), 2);
    }

    #[test]
    fn font_rejects_mismatched_heights() {
        let src = "@glyph A\n#\n#\n@glyph B\n#\n";
        let err = BlockFont::parse(src, p()).unwrap_err();
        assert!(err.to_string().contains("expected 2"));
    }

    #[test]
    fn font_rejects_stray_art_and_empty_files() {
        assert!(BlockFont::parse("#\n@glyph A\n#\n", p()).is_err());
        assert!(matches!(
            BlockFont::parse("", p()),
            Err(AssetError::Empty { .. })
        ));
    }

    #[test]
    fn missing_directory_is_io_error() {
        let err = AssetPack::load(Path::new("/nonexistent/tui-birb-assets")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
        assert!(err.to_string().contains(AssetPack::BACKGROUND));
    }
}
