//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on terminal, files, or clocks, making it:
//!
//! - **Deterministic**: Same seed produces the same gates, frame for frame
//! - **Testable**: Every rule is exercised by unit tests without a terminal
//! - **Portable**: Any front end that can draw rectangles can drive it
//! - **Allocation-light**: The per-frame path only touches preallocated vectors
//!
//! # Module Structure
//!
//! - [`player`]: Vertical motion under constant deceleration, flap, tilt
//! - [`gate`]: Paired top/bottom obstacles and gap generation with fallback
//! - [`session`]: One run's world: spawn, scroll/cull, scoring, collision, floor loop
//! - [`game_state`]: Menu / Playing / Quit state machine and high-score bookkeeping
//! - [`rng`]: Seeded LCG used for gap generation
//! - [`snapshot`]: Fixed-capacity render snapshot
//! - [`store`]: High-score persistence seam
//!
//! # Game Rules
//!
//! - **Gravity**: velocity drops by 0.5 every frame; a flap sets it to 10
//! - **Gates**: two segment counts drawn from 1..=6; if they sum past 7 the pair
//!   is replaced by (3,3), (2,4) or (4,2)
//! - **Scoring**: one point the first frame the player reaches a gate
//! - **Crash**: touching the floor or a gate's solid region ends the run
//! - **High score**: written only when a finished run beats it
//!
//! # Example
//!
//! ```
//! use tui_birb_core::{Game, MemoryStore};
//! use tui_birb_types::{GameAction, Phase};
//!
//! // Create a game; it starts in the menu
//! let mut game = Game::new(12345, MemoryStore::new());
//! assert_eq!(game.phase(), Phase::Menu);
//!
//! // Space starts a run
//! assert_eq!(game.frame(&[GameAction::Flap]), Phase::Playing);
//!
//! // Never flapping again ends on the floor
//! while game.frame(&[]) == Phase::Playing {}
//! assert_eq!(game.phase(), Phase::Menu);
//! assert_eq!(game.last_score(), Some(0));
//! ```
//!
//! # Timing
//!
//! One call to [`Game::frame`](game_state::Game::frame) is one simulation step.
//! The front end caps the loop at 60 frames per second; elapsed wall-clock time
//! is never fed into the rules.

pub mod game_state;
pub mod gate;
pub mod player;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod store;

pub use tui_birb_types as types;

// Re-export commonly used types for convenience
pub use game_state::Game;
pub use gate::{GapRoll, GateHalf, GatePair};
pub use player::Player;
pub use rng::SimpleRng;
pub use session::{Crash, Session, StepReport};
pub use snapshot::{FrameSnapshot, PlayerSnapshot, MAX_VISIBLE_GATES};
pub use store::{MemoryStore, ScoreStore};
