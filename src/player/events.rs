use super::error::PlaybackRejected;
use super::primitive::PlayRequest;

/// Notifications raised by the audio primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// Regular position tick while playing.
    PositionChanged,
    /// The real duration of the loaded source became known.
    MetadataLoaded,
    /// Output actually started.
    Started,
    /// Output actually paused.
    Paused,
    /// The source loaded under `generation` played to its end.
    Ended { generation: u64 },
    /// Resolution of an earlier `request_play`.
    PlayOutcome {
        request: PlayRequest,
        outcome: Result<(), PlaybackRejected>,
    },
}

/// Input raised by the page (keys, sliders, rows) or by media keys.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    TogglePlayback,
    /// Start playback if paused; no-op otherwise.
    Play,
    /// Pause if playing; no-op otherwise.
    Pause,
    ToggleMute,
    Previous,
    Next,
    /// Progress slider input, 0..=100.
    SeekTo(f64),
    /// Move the progress slider by a signed number of percent.
    SeekBy(f64),
    /// Volume slider input, 0..=100.
    VolumeTo(f64),
    /// Move the volume slider by a signed number of percent.
    VolumeBy(f64),
    /// A playlist row was chosen.
    SelectRow(usize),
}
