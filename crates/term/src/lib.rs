//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout libraries and instead renders into a simple framebuffer that
//! is diffed and flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw the fixed 1280x720 world on whatever terminal size is available
//! - Load sprites and the banner font from plain text files

pub mod assets;
pub mod canvas;
pub mod fb;
pub mod game_view;
pub mod pacer;
pub mod projection;
pub mod renderer;

pub use tui_birb_core as core;
pub use tui_birb_types as types;

pub use assets::{AssetError, AssetPack, BlockFont, Frame, Texture};
pub use canvas::{draw_texture, Label, BANNER_SIZE};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Hud, Viewport};
pub use pacer::{fps_from_elapsed, FramePacer};
pub use projection::{CellRect, Projection};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
