//! Frame snapshot - a fixed-capacity copy of what the view draws

use arrayvec::ArrayVec;

use crate::gate::GatePair;
use crate::player::Player;
use crate::types::Phase;

/// Gates that can be alive at once with room to spare
///
/// At the initial speed a gate spawns every 121 frames and lives for
/// (1280 + 64) / 2 = 672 frames, so six are on screen at most.
pub const MAX_VISIBLE_GATES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerSnapshot {
    pub x: i32,
    pub y: i32,
    pub rotation: i32,
}

impl From<Player> for PlayerSnapshot {
    fn from(value: Player) -> Self {
        Self {
            x: value.x,
            y: value.y,
            rotation: value.rotation,
        }
    }
}

/// Everything the view needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameSnapshot {
    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    pub last_score: Option<u32>,
    pub floor_offset: i32,
    pub player: PlayerSnapshot,
    pub gates: ArrayVec<GatePair, MAX_VISIBLE_GATES>,
    pub run: u32,
}

impl FrameSnapshot {
    pub fn playing(&self) -> bool {
        self.phase == Phase::Playing
    }
}

impl Default for FrameSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Menu,
            score: 0,
            high_score: 0,
            last_score: None,
            floor_offset: 0,
            player: PlayerSnapshot::from(Player::new()),
            gates: ArrayVec::new(),
            run: 0,
        }
    }
}
