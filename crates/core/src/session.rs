//! Session module - the mutable world of a single run
//!
//! A `Session` owns everything that changes while playing: the player, the
//! gate sequence, score, scroll speed, spawn timer and floor offset. The state
//! machine creates a fresh one for every run and drives it one frame at a time.

use tracing::debug;

use crate::gate::{GapRoll, GatePair};
use crate::player::Player;
use crate::rng::SimpleRng;
use crate::types::*;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crash {
    /// The player's lower edge reached the floor line
    Floor,
    /// The player entered a gate's solid region
    Gate,
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    pub spawned: Option<GapRoll>,
    pub culled: usize,
    pub scored: u32,
    pub crash: Option<Crash>,
}

#[derive(Debug, Clone)]
pub struct Session {
    player: Player,
    /// Ordered by spawn time, oldest (leftmost) first
    gates: Vec<GatePair>,
    score: u32,
    scroll_speed: i32,
    spawn_timer: i32,
    floor_offset: i32,
    frame: u64,
}

impl Session {
    /// A run in its initial state
    pub fn new() -> Self {
        Self {
            player: Player::new(),
            gates: Vec::with_capacity(16),
            score: 0,
            scroll_speed: INITIAL_SCROLL_SPEED,
            spawn_timer: INITIAL_SPAWN_TIMER,
            floor_offset: 0,
            frame: 0,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn gates(&self) -> &[GatePair] {
        &self.gates
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn scroll_speed(&self) -> i32 {
        self.scroll_speed
    }

    pub fn spawn_timer(&self) -> i32 {
        self.spawn_timer
    }

    pub fn floor_offset(&self) -> i32 {
        self.floor_offset
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn flap(&mut self) {
        self.player.flap();
    }

    /// Change the scroll speed (must stay positive)
    ///
    /// Spawn cadence is `SPAWN_CADENCE / speed` frames, so faster scrolling
    /// also spawns more often.
    pub fn set_scroll_speed(&mut self, speed: i32) {
        self.scroll_speed = speed.max(1);
    }

    /// Place a whole gate (ordered insert by x keeps scans oldest-first)
    pub fn insert_gate(&mut self, gate: GatePair) {
        let at = self.gates.partition_point(|g| g.x <= gate.x);
        self.gates.insert(at, gate);
    }

    /// Frames between spawns at the current speed
    pub fn spawn_threshold(&self) -> i32 {
        SPAWN_CADENCE / self.scroll_speed
    }

    /// Advance the run by one frame
    ///
    /// Order: player physics, spawn, scroll + cull, scoring and collision,
    /// floor scroll. A crash stops the frame where it happens.
    pub fn step(&mut self, rng: &mut SimpleRng) -> StepReport {
        let mut report = StepReport::default();
        self.frame = self.frame.wrapping_add(1);

        if self.player.step() {
            report.crash = Some(Crash::Floor);
            return report;
        }

        report.spawned = self.spawn_tick(rng);
        report.culled = self.scroll_gates();

        let (scored, crash) = self.check_gates();
        report.scored = scored;
        if crash.is_some() {
            report.crash = crash;
            return report;
        }

        self.scroll_floor();
        report
    }

    /// Count the spawn timer and emit a gate at the right edge when it is due
    pub fn spawn_tick(&mut self, rng: &mut SimpleRng) -> Option<GapRoll> {
        let mut spawned = None;
        if self.spawn_timer > self.spawn_threshold() {
            self.spawn_timer = 0;
            let roll = GapRoll::roll(rng);
            debug!(
                top = roll.top,
                bottom = roll.bottom,
                fallback = roll.fallback,
                frame = self.frame,
                "gate spawned"
            );
            self.gates.push(GatePair::new(WORLD_WIDTH, roll));
            spawned = Some(roll);
        }
        self.spawn_timer += 1;
        spawned
    }

    /// Move every gate left by the scroll speed, then drop the ones past the left edge
    ///
    /// Removal is stable: surviving gates keep their relative order.
    pub fn scroll_gates(&mut self) -> usize {
        let speed = self.scroll_speed;
        for gate in &mut self.gates {
            gate.x -= speed;
        }
        let before = self.gates.len();
        self.gates.retain(|g| !g.is_offscreen());
        before - self.gates.len()
    }

    /// Score and collide against live gates, oldest first
    ///
    /// Returns points earned this frame and the first crash found, if any.
    pub fn check_gates(&mut self) -> (u32, Option<Crash>) {
        let mut scored = 0;
        for gate in &mut self.gates {
            if gate.try_score(&self.player) {
                scored += 1;
                self.score += 1;
            }
            if gate.hits(&self.player) {
                return (scored, Some(Crash::Gate));
            }
        }
        (scored, None)
    }

    /// Scroll the looping floor texture, wrapping after one screen width
    pub fn scroll_floor(&mut self) {
        self.floor_offset -= self.scroll_speed;
        if self.floor_offset <= -WORLD_WIDTH {
            self.floor_offset = 0;
        }
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Keep the player hovering in the middle so only gate logic matters
    fn hover(session: &mut Session) {
        let p = session.player_mut();
        p.y = PLAYER_START_Y;
        p.velocity = GRAVITY;
    }

    #[test]
    fn test_new_session() {
        let s = Session::new();
        assert_eq!(s.score(), 0);
        assert_eq!(s.scroll_speed(), INITIAL_SCROLL_SPEED);
        assert_eq!(s.spawn_timer(), INITIAL_SPAWN_TIMER);
        assert_eq!(s.floor_offset(), 0);
        assert!(s.gates().is_empty());
    }

    #[test]
    fn test_first_gate_spawns_on_second_frame() {
        let mut s = Session::new();
        let mut rng = SimpleRng::new(1);
        assert!(s.spawn_tick(&mut rng).is_none());
        assert!(s.spawn_tick(&mut rng).is_some());
        assert_eq!(s.gates().len(), 1);
        assert_eq!(s.gates()[0].x, WORLD_WIDTH);
        assert_eq!(s.spawn_timer(), 1);
    }

    #[test]
    fn test_spawn_cadence_follows_speed() {
        let mut s = Session::new();
        let mut rng = SimpleRng::new(1);
        s.spawn_timer = 0;
        let mut spawns = Vec::new();
        for frame in 0..400 {
            if s.spawn_tick(&mut rng).is_some() {
                spawns.push(frame);
            }
        }
        // timer must exceed 120, i.e. reach 121: a spawn every 121 ticks
        assert_eq!(spawns, vec![121, 242, 363]);
    }

    #[test]
    fn test_scroll_moves_every_gate_by_speed() {
        let mut s = Session::new();
        s.insert_gate(GatePair::new(500, GapRoll::resolve(1, 1, 0)));
        s.insert_gate(GatePair::new(900, GapRoll::resolve(2, 2, 0)));
        s.scroll_gates();
        let xs: Vec<i32> = s.gates().iter().map(|g| g.x).collect();
        assert_eq!(xs, vec![498, 898]);
    }

    #[test]
    fn test_cull_is_stable_and_removes_all_eligible() {
        let mut s = Session::new();
        s.insert_gate(GatePair::new(-63, GapRoll::resolve(1, 1, 0)));
        s.insert_gate(GatePair::new(-64, GapRoll::resolve(2, 2, 0)));
        s.insert_gate(GatePair::new(300, GapRoll::resolve(3, 3, 0)));
        s.insert_gate(GatePair::new(700, GapRoll::resolve(1, 5, 0)));
        let culled = s.scroll_gates();
        assert_eq!(culled, 2);
        let kept: Vec<(i32, u8)> = s.gates().iter().map(|g| (g.x, g.top.segments)).collect();
        assert_eq!(kept, vec![(298, 3), (698, 1)]);
    }

    #[test]
    fn test_insert_gate_keeps_order() {
        let mut s = Session::new();
        s.insert_gate(GatePair::new(900, GapRoll::resolve(1, 1, 0)));
        s.insert_gate(GatePair::new(100, GapRoll::resolve(1, 1, 0)));
        s.insert_gate(GatePair::new(500, GapRoll::resolve(1, 1, 0)));
        let xs: Vec<i32> = s.gates().iter().map(|g| g.x).collect();
        assert_eq!(xs, vec![100, 500, 900]);
    }

    #[test]
    fn test_floor_wraps_after_one_screen() {
        let mut s = Session::new();
        for _ in 0..(WORLD_WIDTH / INITIAL_SCROLL_SPEED - 1) {
            s.scroll_floor();
        }
        assert_eq!(s.floor_offset(), -WORLD_WIDTH + INITIAL_SCROLL_SPEED);
        s.scroll_floor();
        assert_eq!(s.floor_offset(), 0);
    }

    #[test]
    fn test_step_scores_once_per_gate() {
        let mut s = Session::new();
        let mut rng = SimpleRng::new(1);
        s.spawn_timer = i32::MIN / 2;
        // Probe x + 32 = 672 enters the span when the gate reaches 672 - 64 = 608..=672
        s.insert_gate(GatePair::new(680, GapRoll::resolve(1, 1, 0)));

        let mut total = 0;
        for _ in 0..40 {
            hover(&mut s);
            let report = s.step(&mut rng);
            assert_eq!(report.crash, None);
            total += report.scored;
        }
        assert_eq!(total, 1);
        assert_eq!(s.score(), 1);
        assert!(s.gates()[0].scored);
    }

    #[test]
    fn test_step_reports_gate_crash() {
        let mut s = Session::new();
        let mut rng = SimpleRng::new(1);
        s.spawn_timer = i32::MIN / 2;
        // 6 + 1 segments: top solid down to 6*64 + 48 = 432, the hovering player at 360 is inside
        s.insert_gate(GatePair::new(650, GapRoll::resolve(6, 1, 0)));
        hover(&mut s);
        let report = s.step(&mut rng);
        assert_eq!(report.crash, Some(Crash::Gate));
    }

    #[test]
    fn test_step_reports_floor_crash_before_gates() {
        let mut s = Session::new();
        let mut rng = SimpleRng::new(1);
        s.player_mut().y = FLOOR_Y - PLAYER_REACH;
        let report = s.step(&mut rng);
        assert_eq!(report.crash, Some(Crash::Floor));
        assert!(report.spawned.is_none());
        assert_eq!(s.floor_offset(), 0);
    }

    #[test]
    fn test_culled_gates_are_never_collided() {
        let mut s = Session::new();
        let mut rng = SimpleRng::new(1);
        s.spawn_timer = i32::MIN / 2;
        // A closed gate just past the cull line
        s.insert_gate(GatePair::new(-GATE_WIDTH + 1, GapRoll::resolve(6, 1, 0)));
        s.player_mut().x = -GATE_WIDTH - COLLISION_PROBE;
        hover(&mut s);
        let report = s.step(&mut rng);
        assert_eq!(report.culled, 1);
        assert_eq!(report.crash, None);
    }

    #[test]
    fn test_speed_is_clamped_positive() {
        let mut s = Session::new();
        s.set_scroll_speed(0);
        assert_eq!(s.scroll_speed(), 1);
        s.set_scroll_speed(4);
        assert_eq!(s.spawn_threshold(), 60);
    }
}
