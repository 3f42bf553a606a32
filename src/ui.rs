//! Rendering for the album view.
//!
//! Everything here draws from a [`Snapshot`]; nothing in this module
//! mutates playback state.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::catalog::Song;
use crate::config::{ControlsSettings, UiSettings};
use crate::format::{format_time, volume_percent};
use crate::player::Snapshot;

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("enter".to_string(), "play/pause selected".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next song".to_string());
    // H/L is filled dynamically from config.
    map.insert("0-9".to_string(), "jump to tenth".to_string());
    map.insert("-/+".to_string(), "volume".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = ["j/k", "h/l", "H/L", "enter", "space/p", "0-9", "-/+", "q"];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{}s", scrub_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Textual seek bar for the transport box. Unknown progress renders
/// all empty.
fn progress_bar(progress: Option<f32>, width: usize) -> String {
    let filled = progress
        .map_or(0, |p| (p * width as f32).round() as usize)
        .min(width);
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    for i in 0..width {
        bar.push(if i < filled { '#' } else { '-' });
    }
    bar.push(']');
    bar
}

/// One row of the song list. The marker column doubles as the play
/// affordance: the current song shows its transport state, the song
/// under the cursor shows a play hint, everything else its number.
fn track_line(snap: &Snapshot<'_>, index: usize, selected: usize, song: &Song) -> String {
    let marker = if index == snap.current {
        if snap.playing {
            "⏸".to_string()
        } else {
            "▶".to_string()
        }
    } else if index == selected {
        "▶".to_string()
    } else {
        format!("{}", index + 1)
    };
    format!("{marker:>2}  {}  [{}]", song.title, format_time(song.duration))
}

/// Render the entire UI into the provided `frame` from a playback
/// snapshot plus the list cursor.
pub fn draw(
    frame: &mut Frame,
    snap: &Snapshot<'_>,
    selected: usize,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" adagio ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Album box
    let album_info = {
        let mut parts: Vec<String> = Vec::new();
        parts.push(snap.album.title.clone());
        parts.push(format!("by {}", snap.album.artist));
        let release = snap.album.release_info.trim();
        if !release.is_empty() {
            parts.push(release.to_string());
        }
        parts.join(" • ")
    };
    let album_par = Paragraph::new(album_info)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" album "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(album_par, chunks[1]);

    // Song list
    {
        let items: Vec<ListItem> = snap
            .album
            .songs
            .iter()
            .enumerate()
            .map(|(i, song)| ListItem::new(track_line(snap, i, selected, song)))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" songs "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut list_state = ListState::default();
        list_state.select(Some(selected));
        frame.render_stateful_widget(list, chunks[2], &mut list_state);
    }

    // Transport box. The glyph is the same affordance the track list
    // uses: what a press of space would do right now.
    let transport = {
        let glyph = if snap.playing { "⏸" } else { "▶" };
        let line1 = format!("{glyph}  {} - {}", snap.song.title, snap.album.artist);
        let line2 = format!(
            "{} {} / {} • vol {}%",
            progress_bar(snap.progress(), 24),
            format_time(Some(snap.position)),
            format_time(snap.duration),
            volume_percent(snap.volume),
        );
        format!("{line1}\n{line2}")
    };
    let transport_par = Paragraph::new(transport).block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(" transport "),
    );
    frame.render_widget(transport_par, chunks[3]);

    // Controls footer
    let footer_text = controls_text(controls_settings.scrub_seconds);
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
