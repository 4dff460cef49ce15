//! Per-frame input draining.

use std::io;
use std::time::Duration;

use arrayvec::ArrayVec;
use crossterm::event::{self, Event, KeyEventKind};

use crate::map::handle_key_event;
use crate::types::GameAction;

/// Actions kept per frame; more than this in 16ms is key-mashing noise
pub const MAX_FRAME_ACTIONS: usize = 16;

/// Poll-based event source
pub trait EventSource {
    /// Whether an event is ready within `timeout`
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Read the next event (blocks if none is ready)
    fn read(&mut self) -> io::Result<Event>;
}

/// The process terminal via crossterm
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// Everything the loop needs to know about one frame's input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Mapped actions in arrival order
    pub actions: ArrayVec<GameAction, MAX_FRAME_ACTIONS>,
    /// The terminal was resized (the renderer must redraw everything)
    pub resized: bool,
}

impl FrameInput {
    pub fn clear(&mut self) {
        self.actions.clear();
        self.resized = false;
    }

    pub fn quit_requested(&self) -> bool {
        self.actions.contains(&GameAction::Quit)
    }

    fn push(&mut self, action: GameAction) {
        if self.actions.try_push(action).is_ok() {
            return;
        }
        // Full: a quit must still get through.
        if action == GameAction::Quit && !self.quit_requested() {
            self.actions.pop();
            self.actions.push(action);
        }
    }
}

/// Drain every pending event without blocking.
///
/// Only key presses count; repeats and releases are ignored.
pub fn drain_frame_input(source: &mut impl EventSource, out: &mut FrameInput) -> io::Result<()> {
    out.clear();
    while source.poll(Duration::ZERO)? {
        match source.read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(action) = handle_key_event(key) {
                    out.push(action);
                }
            }
            Event::Resize(_, _) => out.resized = true,
            _ => {}
        }
    }
    Ok(())
}
