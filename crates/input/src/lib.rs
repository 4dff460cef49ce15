//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`] and drains every
//! event queued since the previous frame, so the game sees all of a frame's
//! input before its update runs.

pub mod frame;
pub mod map;

pub use tui_birb_types as types;

pub use frame::{drain_frame_input, CrosstermEvents, EventSource, FrameInput, MAX_FRAME_ACTIONS};
pub use map::{handle_key_event, should_quit};
