//! World-to-terminal projection.
//!
//! The simulation runs in a fixed 1280x720 world. Terminals come in any size,
//! so x and y are scaled independently and every non-empty world rectangle
//! covers at least one cell.

use crate::types::{WORLD_HEIGHT, WORLD_WIDTH};

/// A rectangle in terminal cells (may hang off the screen)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    cols: u16,
    rows: u16,
}

impl Projection {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// World x to column (floored, so negative positions stay left of the screen)
    pub fn col(&self, wx: i32) -> i32 {
        (wx as i64 * self.cols as i64).div_euclid(WORLD_WIDTH as i64) as i32
    }

    /// World y to row
    pub fn row(&self, wy: i32) -> i32 {
        (wy as i64 * self.rows as i64).div_euclid(WORLD_HEIGHT as i64) as i32
    }

    /// Project a world rectangle; edges are projected separately so adjacent
    /// rectangles tile without gaps
    pub fn rect(&self, wx: i32, wy: i32, ww: i32, wh: i32) -> CellRect {
        let x = self.col(wx);
        let y = self.row(wy);
        let w = if ww > 0 { (self.col(wx + ww) - x).max(1) } else { 0 };
        let h = if wh > 0 { (self.row(wy + wh) - y).max(1) } else { 0 };
        CellRect { x, y, w, h }
    }
}
