use std::io::Stdout;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config::{self, ControlsSettings};
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{AudioEvent, NowPlaying, UiEvent};
use crate::runtime::Player;
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// What a key press asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Player(UiEvent),
    CursorDown,
    CursorUp,
    PlaySelected,
    ToggleTheme,
    ToggleSnow,
    Quit,
}

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Last view published to MPRIS.
    last_published: Option<NowPlaying>,
    /// Track the cursor last followed.
    last_active: usize,
}

impl EventLoopState {
    pub fn new(player: &Player) -> Self {
        Self {
            last_published: None,
            last_active: player.state().current_index,
        }
    }
}

pub fn key_to_action(key: KeyEvent, controls: &ControlsSettings) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    let seek = controls.seek_step_percent;
    let volume = controls.volume_step_percent;
    let action = match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::Player(UiEvent::TogglePlayback),
        KeyCode::Char('m') => Action::Player(UiEvent::ToggleMute),
        KeyCode::Char('h') | KeyCode::Left => Action::Player(UiEvent::Previous),
        KeyCode::Char('l') | KeyCode::Right => Action::Player(UiEvent::Next),
        KeyCode::Char('H') => Action::Player(UiEvent::SeekBy(-seek)),
        KeyCode::Char('L') => Action::Player(UiEvent::SeekBy(seek)),
        KeyCode::Char('-') => Action::Player(UiEvent::VolumeBy(-volume)),
        KeyCode::Char('+') | KeyCode::Char('=') => Action::Player(UiEvent::VolumeBy(volume)),
        KeyCode::Char(c @ '0'..='9') => {
            let tenth = c.to_digit(10).unwrap_or(0) as f64;
            Action::Player(UiEvent::SeekTo(tenth * 10.0))
        }
        KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
        KeyCode::Enter => Action::PlaySelected,
        KeyCode::Char('t') => Action::ToggleTheme,
        KeyCode::Char('s') => Action::ToggleSnow,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Choosing the row under the cursor loads it and plays it.
fn play_selected(cursor: usize) -> [UiEvent; 2] {
    [UiEvent::SelectRow(cursor), UiEvent::Play]
}

fn shutdown(player: &mut Player, settings: &config::Settings) {
    info!("quitting");
    player
        .audio_mut()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
}

/// Main terminal event loop: drains audio and MPRIS messages into the
/// player, draws, then handles one key press. Returns `Ok(())` when
/// shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player,
    audio_events: &Receiver<AudioEvent>,
    mpris: &MprisHandle,
    control_rx: &Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> anyhow::Result<()> {
    let frame = Duration::from_millis(settings.ui.frame_ms.max(1));

    loop {
        while let Ok(event) = audio_events.try_recv() {
            player.handle_audio_event(event);
        }

        while let Ok(cmd) = control_rx.try_recv() {
            match cmd.to_ui_event() {
                Some(event) => player.handle_ui_event(event),
                None => {
                    shutdown(player, settings);
                    return Ok(());
                }
            }
        }

        // Keep the cursor on the now-playing row when the track changes.
        let active = player.state().current_index;
        if active != state.last_active {
            app.follow(active);
            state.last_active = active;
        }

        // Keep MPRIS in sync even when changes come from media keys or auto-advance.
        let now = player.snapshot();
        if state.last_published.as_ref() != Some(&now) {
            update_mpris(mpris, &now);
            state.last_published = Some(now);
        }

        let size = terminal.size()?;
        app.tick_snow(size.width, size.height);
        terminal.draw(|f| {
            ui::draw(
                f,
                app,
                player.surface(),
                player.playlist(),
                &settings.controls,
            )
        })?;

        if event::poll(frame)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key_to_action(key, &settings.controls) {
                    Some(Action::Player(event)) => player.handle_ui_event(event),
                    Some(Action::CursorDown) => app.cursor_down(),
                    Some(Action::CursorUp) => app.cursor_up(),
                    Some(Action::PlaySelected) => {
                        for event in play_selected(app.cursor) {
                            player.handle_ui_event(event);
                        }
                    }
                    Some(Action::ToggleTheme) => app.toggle_theme(),
                    Some(Action::ToggleSnow) => app.toggle_snow(),
                    Some(Action::Quit) => {
                        shutdown(player, settings);
                        return Ok(());
                    }
                    None => {}
                }
            }
        }
    }
}
