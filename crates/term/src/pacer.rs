//! Frame pacing for the render loop.

use std::time::{Duration, Instant};

/// Caps the loop at a fixed rate and measures the real frame time.
///
/// The loop sleeps for `remaining()` before each frame; the measured time only
/// feeds the FPS readout, never the simulation.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    frame: Duration,
    last_frame: Instant,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self::starting_at(fps, Instant::now())
    }

    pub fn starting_at(fps: u32, now: Instant) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            last_frame: now,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Time left until the next frame is due
    pub fn remaining(&self, now: Instant) -> Duration {
        (self.last_frame + self.frame).saturating_duration_since(now)
    }

    /// Start a new frame at `now` and return the time since the previous one
    pub fn mark(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        elapsed
    }
}

/// Whole frames per second for a measured frame time
pub fn fps_from_elapsed(elapsed: Duration) -> u32 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0;
    }
    (1.0 / secs) as u32
}
