use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::warn;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{Player, PlayerError};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Track-list cursor. Presentation state only; the player knows
    /// nothing about it, and it stays put when the song changes.
    pub selected: usize,
    /// Last `(song index, playing)` pair mirrored to MPRIS.
    last_mpris: (usize, bool),
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `player`.
    pub fn new(player: &Player) -> Self {
        Self {
            selected: player.current(),
            last_mpris: (player.current(), player.is_playing()),
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, sync with the
/// engine and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut Player,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> anyhow::Result<()> {
    loop {
        player.poll_events();

        // Keep MPRIS in sync even when playback changes come from media
        // keys or auto-advance.
        let mirror = (player.current(), player.is_playing());
        if mirror != state.last_mpris {
            update_mpris(mpris, &player.snapshot());
            state.last_mpris = mirror;
        }

        let selected = state.selected;
        terminal.draw(|f| {
            ui::draw(f, &player.snapshot(), selected, &settings.ui, &settings.controls)
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, player) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, player, control_tx, state) {
                    return Ok(());
                }
            }
        }
    }
}

fn handle_control_cmd(cmd: ControlCmd, player: &mut Player) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => {
            if !player.is_playing() {
                log_transport(player.play());
            }
        }
        ControlCmd::Pause => {
            if player.is_playing() {
                player.pause();
            }
        }
        ControlCmd::PlayPause => {
            let current = player.current();
            log_transport(player.toggle_or_select(current));
        }
        ControlCmd::Next => log_transport(player.next()),
        ControlCmd::Prev => log_transport(player.previous()),
    }
    false
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    player: &mut Player,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    let song_count = player.album().songs.len();
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') => {
            if state.selected + 1 < song_count {
                state.selected += 1;
            }
        }
        KeyCode::Char('k') => {
            state.selected = state.selected.saturating_sub(1);
        }
        KeyCode::Enter => {
            log_transport(player.toggle_or_select(state.selected));
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('h') => {
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('l') => {
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('H') => {
            scrub(player, -(settings.controls.scrub_seconds as f64));
        }
        KeyCode::Char('L') => {
            scrub(player, settings.controls.scrub_seconds as f64);
        }
        KeyCode::Char('-') => {
            let volume = player.snapshot().volume - settings.controls.volume_step;
            player.set_volume(volume);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let volume = player.snapshot().volume + settings.controls.volume_step;
            player.set_volume(volume);
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            // 0 jumps to the start of the song, 5 to the middle.
            let tenth = (c as u8 - b'0') as f32;
            player.seek(tenth / 10.0);
        }
        _ => {}
    }
    false
}

/// Relative scrub expressed through the player's fractional seek.
fn scrub(player: &mut Player, delta_secs: f64) {
    let fraction = {
        let snap = player.snapshot();
        let Some(duration) = snap.duration else { return };
        if duration.is_zero() {
            return;
        }
        let total = duration.as_secs_f64();
        let target = (snap.position.as_secs_f64() + delta_secs).clamp(0.0, total);
        (target / total) as f32
    };
    player.seek(fraction);
}

/// Engine refusals show up in the transport state; log and carry on.
fn log_transport(result: Result<(), PlayerError>) {
    if let Err(e) = result {
        warn!("transport command failed: {e}");
    }
}
