//! Player physics - the bird's vertical motion and tilt

use crate::types::*;

/// The player-controlled bird
///
/// `velocity` is positive upward: a flap sets it to [`JUMP_VELOCITY`] and every
/// frame [`GRAVITY`] is subtracted with no terminal-velocity clamp. Screen y grows
/// downward, so the position step subtracts the velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub velocity: f32,
    /// Visual tilt in degrees, `FLAP_ROTATION..=MAX_ROTATION`
    pub rotation: i32,
}

impl Player {
    /// Create a player at the start position, at rest and level
    pub fn new() -> Self {
        Self {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            velocity: 0.0,
            rotation: 0,
        }
    }

    /// Jump: replaces the current velocity and tilts nose up
    pub fn flap(&mut self) {
        self.velocity = JUMP_VELOCITY;
        self.rotation = FLAP_ROTATION;
    }

    /// Advance one frame
    ///
    /// Velocity is updated before the position; the position step truncates
    /// toward zero. Returns true when the bird has reached the floor.
    pub fn step(&mut self) -> bool {
        self.velocity -= GRAVITY;
        self.y = (self.y as f32 - self.velocity) as i32;

        let grounded = self.touches_floor();

        if self.velocity < 0.0 && self.rotation < MAX_ROTATION {
            self.rotation += ROTATION_STEP;
        }

        grounded
    }

    /// Lower edge at or below the floor line
    pub fn touches_floor(&self) -> bool {
        self.y + PLAYER_REACH >= FLOOR_Y
    }

    /// Top-left corner of the 32x32 sprite
    pub fn sprite_origin(&self) -> (i32, i32) {
        (self.x - PLAYER_HALF_EXTENT, self.y - PLAYER_HALF_EXTENT)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
