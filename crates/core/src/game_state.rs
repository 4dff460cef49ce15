//! Game state module - the Menu / Playing / Quit state machine
//!
//! `Game::frame` is the single per-frame entry point. It reads the current
//! phase, runs the matching update and returns the phase for the next frame.
//! Runs never nest: crashing simply switches the phase back to Menu.

use tracing::{info, warn};

use crate::rng::SimpleRng;
use crate::session::{Crash, Session, StepReport};
use crate::snapshot::{FrameSnapshot, PlayerSnapshot};
use crate::store::ScoreStore;
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game<S> {
    phase: Phase,
    session: Session,
    rng: SimpleRng,
    store: S,
    high_score: u32,
    /// Score of the most recently finished run
    last_score: Option<u32>,
    /// Report of the most recent Playing frame
    last_report: StepReport,
    /// Monotonic run counter (increments on every start)
    runs: u32,
}

impl<S: ScoreStore> Game<S> {
    /// Create a game in the menu, reading the high score from `store`
    ///
    /// A missing or unreadable high score counts as 0.
    pub fn new(seed: u32, mut store: S) -> Self {
        let high_score = match store.load() {
            Ok(Some(value)) => value,
            Ok(None) => 0,
            Err(err) => {
                warn!(error = %err, "could not read high score, starting from 0");
                0
            }
        };

        Self {
            phase: Phase::Menu,
            session: Session::new(),
            rng: SimpleRng::new(seed),
            store,
            high_score,
            last_score: None,
            last_report: StepReport::default(),
            runs: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Score of the current (or just finished) run
    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    pub fn last_report(&self) -> StepReport {
        self.last_report
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Direct access to the running world, for scripted setups and tools
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Run one frame with every input drained this frame, in arrival order
    pub fn frame(&mut self, actions: &[GameAction]) -> Phase {
        match self.phase {
            Phase::Menu => self.menu_frame(actions),
            Phase::Playing => self.playing_frame(actions),
            Phase::Quit => {}
        }
        self.phase
    }

    fn menu_frame(&mut self, actions: &[GameAction]) {
        // A quit anywhere in the frame wins over a start press.
        if actions.contains(&GameAction::Quit) {
            self.quit();
        } else if actions.contains(&GameAction::Flap) {
            // The start press is consumed; the run begins at rest.
            self.start_run();
        }
    }

    fn playing_frame(&mut self, actions: &[GameAction]) {
        for &action in actions {
            match action {
                GameAction::Quit => {
                    // Leaving mid-run never touches the high score.
                    self.quit();
                    return;
                }
                GameAction::Flap => self.session.flap(),
            }
        }

        self.last_report = self.session.step(&mut self.rng);
        if let Some(crash) = self.last_report.crash {
            self.finish_run(crash);
        }
    }

    /// Reset the world and enter Playing
    pub fn start_run(&mut self) {
        self.session = Session::new();
        self.last_report = StepReport::default();
        self.runs = self.runs.wrapping_add(1);
        self.phase = Phase::Playing;
        info!(run = self.runs, high_score = self.high_score, "run started");
    }

    fn finish_run(&mut self, crash: Crash) {
        let score = self.session.score();
        self.last_score = Some(score);
        info!(run = self.runs, score, ?crash, "run ended");

        if score > self.high_score {
            self.high_score = score;
            match self.store.store(score) {
                Ok(()) => info!(high_score = score, "new high score saved"),
                Err(err) => warn!(error = %err, high_score = score, "could not save high score"),
            }
        }

        self.phase = Phase::Menu;
    }

    fn quit(&mut self) {
        info!(phase = self.phase.as_str(), "quit requested");
        self.phase = Phase::Quit;
    }

    pub fn snapshot_into(&self, out: &mut FrameSnapshot) {
        out.phase = self.phase;
        out.score = self.session.score();
        out.high_score = self.high_score;
        out.last_score = self.last_score;
        out.floor_offset = self.session.floor_offset();
        out.player = PlayerSnapshot::from(*self.session.player());
        out.run = self.runs;

        out.gates.clear();
        for gate in self.session.gates() {
            if out.gates.try_push(*gate).is_err() {
                break;
            }
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let mut s = FrameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
