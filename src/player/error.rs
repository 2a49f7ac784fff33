use std::fmt;
use std::path::PathBuf;

/// Why the playback environment refused to start playing.
///
/// Never fatal: the player stays paused and waits for the next explicit
/// play request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackRejected {
    /// No audio output device could be opened.
    NoOutputDevice(String),
    /// The track's file does not exist or cannot be opened.
    MissingResource(PathBuf),
    /// The file exists but could not be decoded.
    Undecodable(PathBuf),
    /// Play was requested before any source was loaded.
    NoSource,
    /// The playback backend is no longer running.
    BackendUnavailable,
}

impl fmt::Display for PlaybackRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackRejected::NoOutputDevice(e) => write!(f, "no audio output device ({e})"),
            PlaybackRejected::MissingResource(p) => write!(f, "cannot open {}", p.display()),
            PlaybackRejected::Undecodable(p) => write!(f, "cannot decode {}", p.display()),
            PlaybackRejected::NoSource => write!(f, "no track loaded"),
            PlaybackRejected::BackendUnavailable => write!(f, "audio backend is not running"),
        }
    }
}

impl std::error::Error for PlaybackRejected {}
