//! GameView: maps a `core::FrameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::fmt::Write as _;

use arrayvec::ArrayString;

use crate::assets::AssetPack;
use crate::canvas::{draw_texture, Label};
use crate::core::{FrameSnapshot, GatePair};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::projection::Projection;
use crate::types::*;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Front-end readouts that are not part of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub fps: u32,
}

/// Label text sizes, in the same units as the world
const HUD_SIZE: u16 = 30;
const MENU_SIZE: u16 = 40;
const TITLE_SIZE: u16 = 150;

const TITLE_POS: (i32, i32) = (250, 120);
const PROMPT_POS: (i32, i32) = (415, 330);
const HIGH_SCORE_POS: (i32, i32) = (455, 430);
const LAST_SCORE_POS: (i32, i32) = (455, 480);
const FPS_POS: (i32, i32) = (0, 0);
const SCORE_POS: (i32, i32) = (0, 42);

const FLOOR_HEIGHT: i32 = WORLD_HEIGHT - FLOOR_Y;
const PLAYER_SIZE: i32 = PLAYER_HALF_EXTENT * 2;

/// Draws the menu and playing scenes from loaded assets.
pub struct GameView {
    assets: AssetPack,
}

impl GameView {
    pub fn new(assets: AssetPack) -> Self {
        Self { assets }
    }

    pub fn assets(&self) -> &AssetPack {
        &self.assets
    }

    /// Render the current frame into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &FrameSnapshot,
        hud: Hud,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));
        let proj = Projection::new(viewport.width, viewport.height);

        draw_texture(
            fb,
            &self.assets.background,
            0,
            proj.rect(0, 0, WORLD_WIDTH, WORLD_HEIGHT),
        );

        if snap.playing() {
            self.draw_playing(fb, &proj, snap, hud);
        } else {
            self.draw_menu(fb, &proj, snap);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &FrameSnapshot, hud: Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_playing(&self, fb: &mut FrameBuffer, proj: &Projection, snap: &FrameSnapshot, hud: Hud) {
        // Two copies side by side make the scroll loop seamless.
        for copy in 0..2 {
            let x = snap.floor_offset + copy * WORLD_WIDTH;
            draw_texture(
                fb,
                &self.assets.floor,
                0,
                proj.rect(x, FLOOR_Y, WORLD_WIDTH, FLOOR_HEIGHT),
            );
        }

        for gate in &snap.gates {
            self.draw_gate(fb, proj, gate);
        }

        let player = &snap.player;
        let frame = self.assets.player.frame_for_rotation(player.rotation);
        draw_texture(
            fb,
            &self.assets.player,
            frame,
            proj.rect(
                player.x - PLAYER_HALF_EXTENT,
                player.y - PLAYER_HALF_EXTENT,
                PLAYER_SIZE,
                PLAYER_SIZE,
            ),
        );

        let mut text = ArrayString::<32>::new();
        let _ = write!(text, "FPS: {}", hud.fps);
        self.label(fb, proj, &text, FPS_POS, HUD_SIZE, Rgb::WHITE);

        text.clear();
        let _ = write!(text, "SCORE: {}", snap.score);
        self.label(fb, proj, &text, SCORE_POS, HUD_SIZE, Rgb::WHITE);
    }

    fn draw_gate(&self, fb: &mut FrameBuffer, proj: &Projection, gate: &GatePair) {
        let body = &self.assets.gate_body;
        let cap = &self.assets.gate_cap;
        let cap_x = gate.x - CAP_INSET;

        draw_texture(
            fb,
            body,
            0,
            proj.rect(gate.x, gate.top.y, GATE_WIDTH, gate.top.height()),
        );
        draw_texture(
            fb,
            cap,
            0,
            proj.rect(cap_x, gate.top.y + gate.top.height(), CAP_WIDTH, CAP_HEIGHT),
        );

        draw_texture(
            fb,
            body,
            0,
            proj.rect(gate.x, gate.bottom.y, GATE_WIDTH, gate.bottom.height()),
        );
        draw_texture(
            fb,
            cap,
            0,
            proj.rect(cap_x, gate.bottom.y - CAP_HEIGHT, CAP_WIDTH, CAP_HEIGHT),
        );
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, proj: &Projection, snap: &FrameSnapshot) {
        self.label(fb, proj, "FLAPPY BIRB", TITLE_POS, TITLE_SIZE, Rgb::RED);
        self.label(
            fb,
            proj,
            "Press SPACE to play!",
            PROMPT_POS,
            MENU_SIZE,
            Rgb::GREEN,
        );

        let mut text = ArrayString::<32>::new();
        let _ = write!(text, "HIGHSCORE : {}", snap.high_score);
        self.label(fb, proj, &text, HIGH_SCORE_POS, MENU_SIZE, Rgb::BLUE);

        if let Some(last) = snap.last_score {
            text.clear();
            let _ = write!(text, "LAST SCORE : {}", last);
            self.label(fb, proj, &text, LAST_SCORE_POS, MENU_SIZE, Rgb::BLUE);
        }
    }

    fn label(
        &self,
        fb: &mut FrameBuffer,
        proj: &Projection,
        text: &str,
        (x, y): (i32, i32),
        size: u16,
        color: Rgb,
    ) {
        Label::new(text, proj.col(x), proj.row(y), size, color).draw(fb, &self.assets.font);
    }
}
