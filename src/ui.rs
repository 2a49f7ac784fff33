//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`: the
//! profile header, the player widget, the playlist and the controls footer,
//! with the snowfall drawn on top when enabled.

mod snow;

pub use snow::Snowfall;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::config::ControlsSettings;
use crate::library::{Artwork, Playlist};
use crate::player::{MuteIcon, PlayIcon, SurfaceModel, format_clock};
use crate::prefs::Palette;

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("enter".to_string(), "play selected song".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next song".to_string());
    map.insert("m".to_string(), "mute".to_string());
    map.insert("0-9".to_string(), "jump to 0-90%".to_string());
    // H/L and -/+ are filled dynamically from config.
    map.insert("t".to_string(), "theme".to_string());
    map.insert("s".to_string(), "snow".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating the configured step sizes.
fn controls_text(controls: &ControlsSettings) -> String {
    let order = [
        "j/k", "h/l", "H/L", "0-9", "enter", "space/p", "m", "-/+", "t", "s", "q",
    ];
    order
        .iter()
        .filter_map(|k| match *k {
            "H/L" => Some(format!("[H/L] seek -/+{}%", controls.seek_step_percent)),
            "-/+" => Some(format!("[-/+] volume -/+{}%", controls.volume_step_percent)),
            _ => CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

fn play_glyph(icon: PlayIcon) -> &'static str {
    match icon {
        PlayIcon::Play => "▶",
        PlayIcon::Pause => "⏸",
    }
}

fn mute_glyph(icon: MuteIcon) -> &'static str {
    match icon {
        MuteIcon::Unmuted => "🔊",
        MuteIcon::Muted => "🔇",
    }
}

fn ratio(percent: f64) -> f64 {
    if percent.is_finite() {
        (percent / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Rows `start..end` of `total` that fit in `height`, keeping `selected`
/// centered when possible.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn bordered<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(palette.dim))
        .style(Style::default().fg(palette.foreground).bg(palette.background))
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;
    let mut lines = vec![
        Line::from(Span::styled(
            app.profile.name.as_str(),
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(app.profile.tagline.as_str()),
    ];
    lines.extend(
        app.profile
            .links
            .iter()
            .map(|l| Line::from(Span::styled(l.as_str(), Style::default().fg(palette.dim)))),
    );

    let header = Paragraph::new(lines).alignment(Alignment::Center).block(
        bordered(" howl ", palette)
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(format!(" {} ", app.theme.glyph())).right_aligned()),
    );
    frame.render_widget(header, area);
}

fn draw_player(frame: &mut Frame, app: &App, player: &SurfaceModel, playlist: &Playlist, area: Rect) {
    let palette = &app.palette;
    let block = bordered(" now playing ", palette).padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(9), Constraint::Min(10)])
        .split(inner);

    // Embedded pictures are not decoded; show the glyph and the image type.
    let art = match &playlist.get(player.active_row).artwork {
        Artwork::Embedded { mime } => vec![
            Line::from("◉"),
            Line::from(Span::styled(
                mime.rsplit('/').next().unwrap_or_default().to_string(),
                Style::default().fg(palette.dim),
            )),
        ],
        Artwork::Missing => vec![Line::from(""), Line::from("♪")],
    };
    let art_widget = Paragraph::new(art)
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.primary))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(palette.dim)));
    frame.render_widget(art_widget, cols[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(cols[1]);

    frame.render_widget(
        Paragraph::new(Span::styled(
            player.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(player.artist.as_str(), Style::default().fg(palette.dim))),
        rows[1],
    );

    let progress = Gauge::default()
        .ratio(ratio(player.progress))
        .label(format!("{} / {}", player.current_time, player.duration))
        .gauge_style(Style::default().fg(palette.primary).bg(palette.background));
    frame.render_widget(progress, rows[2]);

    let transport = Line::from(vec![
        Span::raw("⏮  "),
        Span::styled(
            play_glyph(player.play_icon),
            Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  ⏭    "),
        Span::raw(mute_glyph(player.mute_icon)),
    ]);
    frame.render_widget(Paragraph::new(transport), rows[3]);

    let volume = Gauge::default()
        .ratio(ratio(player.volume))
        .label(format!("vol {:.0}%", player.volume))
        .gauge_style(Style::default().fg(palette.dim).bg(palette.background));
    frame.render_widget(volume, rows[4]);
}

fn draw_playlist(frame: &mut Frame, app: &App, player: &SurfaceModel, playlist: &Playlist, area: Rect) {
    let palette = &app.palette;
    let total = playlist.len();
    let height = area.height.saturating_sub(2) as usize;
    let (start, end) = visible_window(total, height, app.cursor);

    // Only build ListItems for the visible window.
    let items: Vec<ListItem> = playlist.tracks()[start..end]
        .iter()
        .enumerate()
        .map(|(offset, track)| {
            let i = start + offset;
            let active = i == player.active_row;
            let marker = if active { "♪ " } else { "  " };
            let style = if active {
                Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker}{}", track.title), style),
                Span::styled(format!(" · {}", track.artist), Style::default().fg(palette.dim)),
                Span::styled(
                    format!("  {}", format_clock(track.nominal_duration)),
                    Style::default().fg(palette.dim),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(bordered(" playlist ", palette))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(app.cursor.saturating_sub(start)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_snow(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    for flake in app.snow.flakes() {
        if flake.x >= area.width || flake.y >= area.height {
            continue;
        }
        if let Some(cell) = buf.cell_mut((area.x + flake.x, area.y + flake.y)) {
            cell.set_symbol("*").set_fg(app.palette.foreground);
        }
    }
}

/// Render the entire page into `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    player: &SurfaceModel,
    playlist: &Playlist,
    controls: &ControlsSettings,
) {
    let header_height = 4 + app.profile.links.len() as u16;
    let notice_height = u16::from(player.notice.is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Length(7),
            Constraint::Length(notice_height),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    frame.render_widget(
        Block::default().style(Style::default().fg(app.palette.foreground).bg(app.palette.background)),
        frame.area(),
    );

    draw_header(frame, app, chunks[0]);
    draw_player(frame, app, player, playlist, chunks[1]);

    if let Some(notice) = &player.notice {
        let notice = Paragraph::new(notice.as_str())
            .style(Style::default().fg(app.palette.primary))
            .alignment(Alignment::Center);
        frame.render_widget(notice, chunks[2]);
    }

    draw_playlist(frame, app, player, playlist, chunks[3]);

    let footer = Paragraph::new(controls_text(controls))
        .block(bordered(" controls ", &app.palette).padding(Padding::left(1)))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    if app.snow_enabled {
        draw_snow(frame, app);
    }
}
