use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/howl/config.toml` or `~/.config/howl/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `HOWL__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub profile: ProfileSettings,
    pub audio: AudioSettings,
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub library: LibrarySettings,
    pub playlist: PlaylistSettings,
    pub logging: LoggingSettings,
}

/// Who the page is about.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    pub name: String,
    pub tagline: String,
    /// Free-form lines shown under the tagline (socials, site, contact).
    pub links: Vec<String>,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            name: "Howler".to_string(),
            tagline: "music, code and late nights".to_string(),
            links: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Output volume at startup, in `[0, 1]`.
    pub initial_volume: f64,
    /// How often the audio thread reports the playback position (milliseconds).
    pub tick_ms: u64,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 0.5,
            tick_ms: 250,
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// What happens when a track finishes.
    pub end_of_track: EndOfTrackSetting,
    /// Request playback right after startup.
    pub autoplay: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            end_of_track: EndOfTrackSetting::Advance,
            autoplay: false,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EndOfTrackSetting {
    #[serde(alias = "next", alias = "auto-advance", alias = "auto_advance")]
    Advance,
    #[serde(alias = "reset", alias = "stop-and-reset", alias = "stop_and_reset")]
    Stop,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Percentage of the track to skip when pressing `H` / `L`.
    pub seek_step_percent: f64,
    /// Volume change, in percent, when pressing `-` / `+`.
    pub volume_step_percent: f64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_step_percent: 5.0,
            volume_step_percent: 5.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Frame redraw / input poll interval (milliseconds).
    pub frame_ms: u64,
    /// Number of flakes kept on screen while the snow effect is on.
    pub snow_flakes: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            frame_ms: 50,
            snow_flakes: 40,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}

/// Where the playlist comes from when no directory is given on the command line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Explicit tracks, in playback order.
    pub tracks: Vec<TrackEntry>,
    /// Directory to scan when `tracks` is empty.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackEntry {
    pub file: PathBuf,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    /// Fallback duration shown before the file's real length is known.
    #[serde(default)]
    pub duration_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `env_logger` filter, e.g. `info` or `howl=debug`. `RUST_LOG` wins.
    pub level: String,
    /// Log file; defaults to `$XDG_STATE_HOME/howl/howl.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
