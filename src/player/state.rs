//! Playback state owned by the controller.

/// Transport state shown by the play/pause button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Paused,
    Playing,
}

/// What happens when the current track reaches its end.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum EndOfTrackPolicy {
    /// Move to the next track (wrapping) and keep playing.
    #[default]
    Advance,
    /// Stop and rewind the finished track to zero.
    Stop,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    /// Always a valid playlist index.
    pub current_index: usize,
    pub is_playing: bool,
    pub is_muted: bool,
    /// Effective output volume in `[0, 1]`; zero while muted.
    pub volume: f64,
    /// Volume to restore when unmuting.
    pub saved_volume: f64,
}

impl PlaybackState {
    pub fn new(volume: f64) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        Self {
            current_index: 0,
            is_playing: false,
            is_muted: false,
            volume,
            saved_volume: volume,
        }
    }

    pub fn play_state(&self) -> PlayState {
        if self.is_playing {
            PlayState::Playing
        } else {
            PlayState::Paused
        }
    }
}
