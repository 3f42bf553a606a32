use std::env;
use std::sync::mpsc;

use anyhow::Context;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::engine::RodioEngine;
use crate::mpris::{self, ControlCmd};
use crate::player::Player;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

/// Wires everything together and runs the UI until quit: settings,
/// catalog, audio engine, player, MPRIS, then the terminal loop.
pub fn run() -> anyhow::Result<()> {
    let settings = settings::load_settings();

    let slug = env::args().nth(1);
    let album = startup::pick_album(&settings, slug.as_deref())?;

    let engine = RodioEngine::start().context("starting audio engine")?;
    let mut player = Player::new(album, Box::new(engine), settings.playback.volume)
        .context("opening album for playback")?;

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = mpris::spawn_mpris(control_tx.clone());
    mpris_sync::update_mpris(&mpris, &player.snapshot());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = {
        let mut state = event_loop::EventLoopState::new(&player);
        event_loop::run(
            &mut terminal,
            &settings,
            &mut player,
            &mpris,
            &control_tx,
            &control_rx,
            &mut state,
        )
    };

    // Detach engine callbacks before the handle goes away, then give
    // the terminal back even if the loop errored.
    player.close();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
