use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::RodioPrimitive;
use crate::mpris::ControlCmd;
use crate::player::{PlayerController, SurfaceModel, UiEvent};

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;
mod startup;


/// The player as wired up at runtime.
pub type Player = PlayerController<RodioPrimitive, SurfaceModel>;

/// Run `enter`; if it fails part-way, run `restore` before handing back the error.
fn enter_or_restore<T, E>(
    enter: impl FnOnce() -> Result<T, E>,
    restore: impl FnOnce(),
) -> Result<T, E> {
    enter().inspect_err(|_| restore())
}

pub fn run() -> anyhow::Result<()> {
    let settings = settings::load_settings();
    if let Err(e) = logging::init_logging(&settings.logging) {
        eprintln!("howl: logging disabled: {e:#}");
    }
    info!("starting howl {}", env!("CARGO_PKG_VERSION"));

    let prefs = startup::open_prefs();
    let cli_dir = env::args_os().nth(1).map(PathBuf::from);
    let playlist = startup::build_playlist(cli_dir.as_deref(), &settings)?;
    info!("{} tracks in playlist", playlist.len());

    let (audio, audio_events) = RodioPrimitive::spawn(settings.audio.clone());
    let mut player = PlayerController::new(
        playlist,
        audio,
        SurfaceModel::default(),
        startup::controller_options(&settings),
    );
    let mut app = App::new(
        settings.profile.clone(),
        prefs,
        player.playlist().len(),
        settings.ui.snow_flakes,
    );

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    if settings.playback.autoplay {
        player.handle_ui_event(UiEvent::Play);
    }

    enable_raw_mode()?;
    let mut terminal = enter_or_restore(
        || -> std::io::Result<_> {
            let mut stdout = std::io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Terminal::new(CrosstermBackend::new(stdout))
        },
        || {
            let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        },
    )?;

    let run_result = (|| {
        let mut state = event_loop::EventLoopState::new(&player);
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut player,
            &audio_events,
            &mpris,
            &control_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
