//! Gate module - paired top/bottom obstacles with a guaranteed gap
//!
//! A gate is spawned, scrolled and culled as one value, so its two halves can
//! never drift apart or be removed separately.

use crate::player::Player;
use crate::rng::SimpleRng;
use crate::types::*;

/// One half of a gate: a stack of segments anchored to the ceiling or the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GateHalf {
    /// Upper edge of the body (fixed at spawn)
    pub y: i32,
    /// Segment count, `MIN_SEGMENTS..=MAX_SEGMENTS`
    pub segments: u8,
}

impl GateHalf {
    pub fn height(&self) -> i32 {
        self.segments as i32 * SEGMENT_HEIGHT
    }
}

/// Segment counts chosen for a spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapRoll {
    pub top: u8,
    pub bottom: u8,
    /// The raw draw would have closed the gap and was replaced
    pub fallback: bool,
}

impl GapRoll {
    /// Apply the fallback rule to a raw draw
    ///
    /// If the two counts together exceed [`MAX_COMBINED_SEGMENTS`], both are
    /// discarded and replaced by `FALLBACK_SEGMENTS[variation % 3]`.
    pub fn resolve(top: u8, bottom: u8, variation: u32) -> Self {
        if top + bottom > MAX_COMBINED_SEGMENTS {
            let (top, bottom) = FALLBACK_SEGMENTS[variation as usize % FALLBACK_SEGMENTS.len()];
            Self {
                top,
                bottom,
                fallback: true,
            }
        } else {
            Self {
                top,
                bottom,
                fallback: false,
            }
        }
    }

    /// Draw two counts uniformly from 1..=6 and apply the fallback rule
    pub fn roll(rng: &mut SimpleRng) -> Self {
        let top = rng.roll(MAX_SEGMENTS);
        let bottom = rng.roll(MAX_SEGMENTS);
        if top + bottom > MAX_COMBINED_SEGMENTS {
            let variation = rng.next_range(FALLBACK_SEGMENTS.len() as u32);
            Self::resolve(top, bottom, variation)
        } else {
            Self::resolve(top, bottom, 0)
        }
    }

    /// Open vertical space between the two halves
    pub fn gap(&self) -> i32 {
        FLOOR_Y - (self.top as i32 + self.bottom as i32) * SEGMENT_HEIGHT
    }
}

/// A top/bottom obstacle pair sharing one horizontal position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GatePair {
    /// Left edge of both bodies
    pub x: i32,
    pub top: GateHalf,
    pub bottom: GateHalf,
    /// The player has already been credited for this gate
    pub scored: bool,
}

impl GatePair {
    /// Build a gate at `x`: the top half hangs from the ceiling, the bottom half stands on the floor
    pub fn new(x: i32, roll: GapRoll) -> Self {
        Self {
            x,
            top: GateHalf {
                y: 0,
                segments: roll.top,
            },
            bottom: GateHalf {
                y: FLOOR_Y - SEGMENT_HEIGHT * roll.bottom as i32,
                segments: roll.bottom,
            },
            scored: false,
        }
    }

    /// Inclusive horizontal span test against a probe column
    pub fn spans(&self, probe_x: i32) -> bool {
        probe_x >= self.x && probe_x <= self.x + GATE_WIDTH
    }

    /// Lowest y still solid for the top half
    pub fn top_solid_bottom(&self) -> i32 {
        self.top.y + self.top.height() + COLLISION_SLACK
    }

    /// Highest y already solid for the bottom half
    pub fn bottom_solid_top(&self) -> i32 {
        self.bottom.y - COLLISION_SLACK
    }

    /// Credit the player once, the first frame its scoring probe enters the span
    pub fn try_score(&mut self, player: &Player) -> bool {
        if self.scored || !self.spans(player.x + PLAYER_REACH) {
            return false;
        }
        self.scored = true;
        true
    }

    /// Whether the player overlaps either half's solid region
    pub fn hits(&self, player: &Player) -> bool {
        if !self.spans(player.x + COLLISION_PROBE) {
            return false;
        }
        player.y <= self.top_solid_bottom() || player.y >= self.bottom_solid_top()
    }

    /// Fully past the left edge of the world
    pub fn is_offscreen(&self) -> bool {
        self.x < -GATE_WIDTH
    }
}
