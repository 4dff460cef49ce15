//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (game rules, terminal rendering, input mapping).
//!
//! # World Coordinates
//!
//! The game is simulated in a fixed 1280x720 world. The renderer projects it
//! onto whatever terminal size is available, so every rule below is expressed
//! in world units and never in terminal cells.
//!
//! - **Floor**: y = 660; the player crashes when its lower edge reaches it
//! - **Gates**: 64 units wide, built from 64-unit tall segments (1 to 6 per half)
//! - **Player**: 32x32, centred on its position, fixed at x = 640
//!
//! # Frame Constants
//!
//! The simulation is frame-counted, not time-based:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_RATE` | 60 | Frames per second cap |
//! | `GRAVITY` | 0.5 | Velocity lost per frame |
//! | `JUMP_VELOCITY` | 10.0 | Velocity set by a flap |
//! | `INITIAL_SCROLL_SPEED` | 2 | World units scrolled per frame |
//! | `SPAWN_CADENCE` | 240 | Spawn when the timer exceeds `240 / speed` |
//!
//! # Examples
//!
//! ```
//! use tui_birb_types::{GameAction, Phase, FLOOR_Y, WORLD_HEIGHT};
//!
//! assert_ne!(GameAction::Flap, GameAction::Quit);
//! assert_eq!(Phase::default(), Phase::Menu);
//! assert_eq!(Phase::Playing.as_str(), "playing");
//!
//! assert!(FLOOR_Y < WORLD_HEIGHT);
//! ```

/// World width in world units
pub const WORLD_WIDTH: i32 = 1280;

/// World height in world units
pub const WORLD_HEIGHT: i32 = 720;

/// The floor line. Bottom gates grow upward from here.
pub const FLOOR_Y: i32 = 660;

/// Width of a gate body. Also the distance past x = 0 a gate travels before it is culled.
pub const GATE_WIDTH: i32 = 64;

/// Height of one gate segment
pub const SEGMENT_HEIGHT: i32 = 64;

/// Smallest segment count drawn for one gate half
pub const MIN_SEGMENTS: u8 = 1;

/// Largest segment count drawn for one gate half
pub const MAX_SEGMENTS: u8 = 6;

/// Largest combined segment count that still leaves a passable gap
pub const MAX_COMBINED_SEGMENTS: u8 = 7;

/// Replacement pairs used when a raw draw would close the gap
pub const FALLBACK_SEGMENTS: [(u8, u8); 3] = [(3, 3), (2, 4), (4, 2)];

/// Gate cap sprite width
pub const CAP_WIDTH: i32 = 70;

/// Gate cap sprite height
pub const CAP_HEIGHT: i32 = 32;

/// Caps are drawn this far left of the body so they overhang both sides
pub const CAP_INSET: i32 = 3;

/// Velocity set by a flap
pub const JUMP_VELOCITY: f32 = 10.0;

/// Velocity lost every frame
pub const GRAVITY: f32 = 0.5;

/// Half the player sprite size (the sprite is centred on the player position)
pub const PLAYER_HALF_EXTENT: i32 = 16;

/// Offset from the player position to its lower edge and scoring probe
pub const PLAYER_REACH: i32 = 32;

/// Horizontal offset of the collision probe
pub const COLLISION_PROBE: i32 = 16;

/// Extra vertical reach of a gate's solid region (covers the cap)
pub const COLLISION_SLACK: i32 = 48;

/// Rotation set by a flap (degrees, nose up)
pub const FLAP_ROTATION: i32 = -30;

/// Rotation added per frame while falling
pub const ROTATION_STEP: i32 = 2;

/// Rotation never tilts past this (degrees, nose down)
pub const MAX_ROTATION: i32 = 90;

/// Player start position
pub const PLAYER_START_X: i32 = WORLD_WIDTH / 2;
pub const PLAYER_START_Y: i32 = WORLD_HEIGHT / 2;

/// Scroll speed at the start of every run
pub const INITIAL_SCROLL_SPEED: i32 = 2;

/// Spawn cadence numerator. A gate spawns once the timer exceeds `SPAWN_CADENCE / speed`.
pub const SPAWN_CADENCE: i32 = 240;

/// Spawn timer at the start of every run (the first gate spawns almost immediately)
pub const INITIAL_SPAWN_TIMER: i32 = 120;

/// Frame rate cap
pub const FRAME_RATE: u32 = 60;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_pairs_leave_a_gap() {
        for (a, b) in FALLBACK_SEGMENTS {
            assert!(a + b <= MAX_COMBINED_SEGMENTS);
            assert!((MIN_SEGMENTS..=MAX_SEGMENTS).contains(&a));
            assert!((MIN_SEGMENTS..=MAX_SEGMENTS).contains(&b));
        }
    }

    #[test]
    fn tallest_legal_gate_is_still_passable() {
        let gap = FLOOR_Y - (MAX_COMBINED_SEGMENTS as i32) * SEGMENT_HEIGHT;
        assert!(gap > 2 * PLAYER_HALF_EXTENT);
    }

    #[test]
    fn initial_spawn_timer_is_one_frame_short_of_cadence() {
        assert_eq!(INITIAL_SPAWN_TIMER, SPAWN_CADENCE / INITIAL_SCROLL_SPEED);
    }
}

/// Player inputs understood by the game
///
/// Menu and Playing interpret the same actions differently:
/// - **Flap**: starts a run from the menu, jumps while playing
/// - **Quit**: leaves the program from any phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Jump (or start a run from the menu)
    Flap,
    /// Exit the program without saving an unfinished run
    Quit,
}

/// Top-level game phase
///
/// The cycle goes: Menu → Playing → Menu → ... and ends in Quit.
/// There is no pause and no separate game-over screen; the menu doubles as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Title screen showing the high score, waiting for Flap
    #[default]
    Menu,
    /// A run in progress
    Playing,
    /// The program should exit
    Quit,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Menu => "menu",
            Phase::Playing => "playing",
            Phase::Quit => "quit",
        }
    }
}
