//! Flappy Birb in the terminal (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tui_birb::{core,input,store,term,types}` and adds the
//! binary's configuration and logging setup.

pub mod config;
pub mod logging;

pub use tui_birb_core as core;
pub use tui_birb_input as input;
pub use tui_birb_store as store;
pub use tui_birb_term as term;
pub use tui_birb_types as types;
