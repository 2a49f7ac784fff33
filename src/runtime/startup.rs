use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{info, warn};

use crate::config::{self, EndOfTrackSetting, resolve_config_path};
use crate::library::{Playlist, Track, from_entries, scan};
use crate::player::{ControllerOptions, EndOfTrackPolicy};
use crate::prefs::{PreferenceStore, resolve_prefs_path};

/// Pick the playlist source: a directory given on the command line, then
/// configured tracks, then the configured directory, then `cwd`.
///
/// Relative config paths resolve against `config_dir`.
pub fn collect_tracks(
    cli_dir: Option<&Path>,
    settings: &config::Settings,
    config_dir: &Path,
    cwd: &Path,
) -> Vec<Track> {
    if let Some(dir) = cli_dir {
        info!("scanning {}", dir.display());
        return scan(dir, &settings.library);
    }
    if !settings.playlist.tracks.is_empty() {
        return from_entries(&settings.playlist.tracks, config_dir);
    }
    if let Some(dir) = &settings.playlist.dir {
        let dir = config_dir.join(dir);
        info!("scanning {}", dir.display());
        return scan(&dir, &settings.library);
    }
    info!("scanning {}", cwd.display());
    scan(cwd, &settings.library)
}

pub fn build_playlist(cli_dir: Option<&Path>, settings: &config::Settings) -> anyhow::Result<Playlist> {
    let cwd = std::env::current_dir().context("reading current directory")?;
    let config_dir = resolve_config_path()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| cwd.clone());

    let tracks = collect_tracks(cli_dir, settings, &config_dir, &cwd);
    Playlist::new(tracks).context("nothing to play: no audio files found")
}

/// Open the preference store, or fall back to an in-memory one.
pub fn open_prefs() -> PreferenceStore {
    let Some(path) = resolve_prefs_path() else {
        warn!("no preferences location, changes will not be saved");
        return PreferenceStore::in_memory();
    };
    match PreferenceStore::open(&path) {
        Ok(store) => store,
        Err(e) => {
            warn!("could not read {}: {e}, using defaults", path.display());
            PreferenceStore::in_memory()
        }
    }
}

pub fn controller_options(settings: &config::Settings) -> ControllerOptions {
    ControllerOptions {
        initial_volume: settings.audio.initial_volume,
        end_of_track: match settings.playback.end_of_track {
            EndOfTrackSetting::Advance => EndOfTrackPolicy::Advance,
            EndOfTrackSetting::Stop => EndOfTrackPolicy::Stop,
        },
    }
}
