//! Commands and shared state of the audio thread.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::player::PlayRequest;

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the current source. `generation` tags every later report
    /// about it.
    Load { source: PathBuf, generation: u64 },
    /// Try to start playback and answer with a `PlayOutcome`.
    Play(PlayRequest),
    Pause,
    /// Jump to an absolute position in the current source.
    Seek(Duration),
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Playback facts published by the audio thread and read synchronously by
/// the primitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackInfo {
    /// Source these facts belong to; stale reports are dropped.
    pub generation: u64,
    pub position: Duration,
    /// Real length of the source, once decoded.
    pub duration: Option<Duration>,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
