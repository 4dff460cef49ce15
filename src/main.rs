//! Terminal Flappy Birb runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer.
//! Everything that can fail at startup (assets, log file) is checked before
//! the terminal switches to raw mode.

use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use tui_birb::config::AppConfig;
use tui_birb::core::{FrameSnapshot, Game};
use tui_birb::input::{drain_frame_input, CrosstermEvents, FrameInput};
use tui_birb::logging;
use tui_birb::store::FileScoreStore;
use tui_birb::term::{
    fps_from_elapsed, AssetPack, FrameBuffer, FramePacer, GameView, Hud, TerminalRenderer,
    Viewport,
};
use tui_birb::types::{Phase, FRAME_RATE};

const TITLE: &str = "FLAPPY BIRB";

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    logging::init(config.log_path.as_deref())?;

    let assets = AssetPack::load(&config.assets_dir)
        .with_context(|| format!("failed to load assets from {}", config.assets_dir.display()))?;
    let view = GameView::new(assets);

    info!(
        assets = %config.assets_dir.display(),
        score_file = %config.score_file.display(),
        seed = config.seed,
        "starting"
    );
    let mut game = Game::new(config.seed, FileScoreStore::new(&config.score_file));

    let mut term = TerminalRenderer::new();
    term.enter(TITLE)?;

    let result = run(&mut term, &mut game, &view);

    // Always try to restore terminal state.
    let restored = term.exit();
    info!(high_score = game.high_score(), "shutting down");
    result.and(restored)
}

fn run(term: &mut TerminalRenderer, game: &mut Game<FileScoreStore>, view: &GameView) -> Result<()> {
    let mut events = CrosstermEvents;
    let mut input = FrameInput::default();
    let mut snap = FrameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut pacer = FramePacer::new(FRAME_RATE);
    let mut hud = Hud::default();

    loop {
        drain_frame_input(&mut events, &mut input)?;
        if input.resized {
            term.invalidate();
        }

        if game.frame(&input.actions) == Phase::Quit {
            return Ok(());
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, hud, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        thread::sleep(pacer.remaining(Instant::now()));
        hud.fps = fps_from_elapsed(pacer.mark(Instant::now()));
    }
}
