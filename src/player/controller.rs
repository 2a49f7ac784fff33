use std::time::Duration;

use log::{debug, info, warn};

use crate::library::{Playlist, Track};

use super::error::PlaybackRejected;
use super::events::{AudioEvent, UiEvent};
use super::format::{format_clock, progress_percent};
use super::primitive::{AudioPrimitive, PlayRequest};
use super::state::{EndOfTrackPolicy, PlayState, PlaybackState};
use super::surface::{MuteIcon, PlayIcon, UiSurface};

#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    pub initial_volume: f64,
    pub end_of_track: EndOfTrackPolicy,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            initial_volume: 0.5,
            end_of_track: EndOfTrackPolicy::Advance,
        }
    }
}

/// Read-only view of what is playing, for publishers outside the page.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub index: usize,
    pub track: Track,
    pub play_state: PlayState,
    pub duration: Duration,
    /// Output volume, 0.0..=1.0.
    pub volume: f64,
}

/// Mediates between one audio primitive and the page.
///
/// All mutation goes through the methods below; the surface is only ever
/// written from here, so what it shows is derived from `PlaybackState` and
/// the primitive's position/duration.
pub struct PlayerController<A, U> {
    playlist: Playlist,
    state: PlaybackState,
    audio: A,
    surface: U,
    end_of_track: EndOfTrackPolicy,
    /// The play request whose outcome we are still waiting for. Cleared by an
    /// explicit pause, so a late acceptance cannot resurrect playback.
    pending_play: Option<PlayRequest>,
    /// Generation of the source currently loaded in the primitive.
    loaded: u64,
    /// The rejection notice is shown at most once per session.
    advised: bool,
}

impl<A: AudioPrimitive, U: UiSurface> PlayerController<A, U> {
    /// Load the first track paused and paint the whole widget.
    pub fn new(playlist: Playlist, mut audio: A, surface: U, options: ControllerOptions) -> Self {
        let state = PlaybackState::new(options.initial_volume);
        audio.set_volume(state.volume);
        let loaded = audio.load(&playlist.get(state.current_index).source);

        let mut controller = Self {
            playlist,
            state,
            audio,
            surface,
            end_of_track: options.end_of_track,
            pending_play: None,
            loaded,
            advised: false,
        };
        controller.render_all();
        controller
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn current_track(&self) -> &Track {
        self.playlist.get(self.state.current_index)
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }

    #[cfg(test)]
    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    #[cfg(test)]
    pub fn is_play_pending(&self) -> bool {
        self.pending_play.is_some()
    }

    /// Real duration once the primitive knows it, else the track's nominal one.
    pub fn effective_duration(&self) -> Duration {
        self.audio
            .duration()
            .filter(|d| !d.is_zero())
            .unwrap_or(self.current_track().nominal_duration)
    }

    pub fn snapshot(&self) -> NowPlaying {
        NowPlaying {
            index: self.state.current_index,
            track: self.current_track().clone(),
            play_state: self.state.play_state(),
            duration: self.effective_duration(),
            volume: self.state.volume,
        }
    }

    /// Switch to `index` (wrapped onto the playlist ring), keeping the
    /// current play/pause intent.
    pub fn load_track(&mut self, index: i64) {
        let resume = self.state.is_playing || self.pending_play.is_some();
        self.switch_to(index, resume);
    }

    pub fn next(&mut self) {
        self.load_track(self.state.current_index as i64 + 1);
    }

    pub fn previous(&mut self) {
        self.load_track(self.state.current_index as i64 - 1);
    }

    pub fn select_row(&mut self, index: usize) {
        self.load_track(index as i64);
    }

    pub fn toggle_playback(&mut self) {
        if self.state.is_playing {
            self.pause_now();
        } else if let Some(request) = self.pending_play {
            debug!("{request:?} still in flight, not asking again");
        } else {
            self.request_playback();
        }
    }

    pub fn toggle_mute(&mut self) {
        if self.state.is_muted {
            self.state.volume = self.state.saved_volume;
            self.state.is_muted = false;
        } else {
            self.state.saved_volume = self.state.volume;
            self.state.volume = 0.0;
            self.state.is_muted = true;
        }
        self.audio.set_volume(self.state.volume);
        self.render_volume();
    }

    /// Set the output volume directly; any audible volume clears mute.
    pub fn set_volume(&mut self, volume: f64) {
        if !volume.is_finite() {
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        self.state.volume = volume;
        if volume > 0.0 && self.state.is_muted {
            self.state.is_muted = false;
        }
        self.audio.set_volume(volume);
        self.render_volume();
    }

    /// Jump to `percent` (0..=100) of the effective duration.
    pub fn seek(&mut self, percent: f64) {
        if !percent.is_finite() {
            return;
        }
        let fraction = percent.clamp(0.0, 100.0) / 100.0;
        let target = self.effective_duration().mul_f64(fraction);
        self.audio.set_position(target);
        self.on_position_changed();
    }

    pub fn on_position_changed(&mut self) {
        let position = self.audio.position();
        let total = self.effective_duration();
        self.surface.set_progress(progress_percent(position, total));
        self.surface
            .set_time_labels(format_clock(position), format_clock(total));
    }

    pub fn on_playback_started(&mut self) {
        if self.pending_play.is_none() && !self.state.is_playing {
            // A pause was requested after this start; its notification follows.
            debug!("ignoring start notification superseded by a pause");
            return;
        }
        self.state.is_playing = true;
        self.render_play_icon();
    }

    pub fn on_playback_paused(&mut self) {
        self.state.is_playing = false;
        self.render_play_icon();
    }

    pub fn on_play_outcome(&mut self, request: PlayRequest, outcome: Result<(), PlaybackRejected>) {
        let current = self.pending_play == Some(request);
        match outcome {
            Ok(()) if current => {
                self.pending_play = None;
                self.state.is_playing = true;
                self.render_play_icon();
                self.surface.set_notice(None);
                let track = self.current_track();
                info!("playing \"{}\" by {}", track.title, track.artist);
            }
            Ok(()) => {
                if self.pending_play.is_none() && !self.state.is_playing {
                    debug!("{request:?} accepted after an explicit pause, pausing again");
                    self.audio.pause();
                }
            }
            Err(reason) => {
                if current {
                    self.pending_play = None;
                }
                warn!("playback rejected: {reason}");
                self.render_play_icon();
                if current && !self.advised {
                    self.advised = true;
                    self.surface.set_notice(Some(format!(
                        "Playback could not start: {reason}. Press space to try again."
                    )));
                }
            }
        }
    }

    /// End of the source loaded under `generation`. Ignored when that source
    /// was already replaced or the player was paused since.
    pub fn on_playback_ended(&mut self, generation: u64) {
        if generation != self.loaded {
            debug!("ignoring end of replaced source (generation {generation})");
            return;
        }
        if !self.state.is_playing && self.pending_play.is_none() {
            debug!("ignoring end of track after an explicit pause");
            return;
        }
        match self.end_of_track {
            EndOfTrackPolicy::Advance => {
                debug!("track {} ended, advancing", self.state.current_index);
                self.switch_to(self.state.current_index as i64 + 1, true);
            }
            EndOfTrackPolicy::Stop => {
                debug!("track {} ended, rewinding", self.state.current_index);
                self.audio.pause();
                self.state.is_playing = false;
                self.pending_play = None;
                self.audio.set_position(Duration::ZERO);
                self.render_play_icon();
                self.on_position_changed();
            }
        }
    }

    pub fn handle_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::TogglePlayback => self.toggle_playback(),
            UiEvent::Play => {
                if !self.state.is_playing && self.pending_play.is_none() {
                    self.request_playback();
                }
            }
            UiEvent::Pause => {
                if self.state.is_playing || self.pending_play.is_some() {
                    self.pause_now();
                }
            }
            UiEvent::ToggleMute => self.toggle_mute(),
            UiEvent::Previous => self.previous(),
            UiEvent::Next => self.next(),
            UiEvent::SeekTo(percent) => self.seek(percent),
            UiEvent::SeekBy(delta) => {
                let now = progress_percent(self.audio.position(), self.effective_duration());
                self.seek(now + delta);
            }
            UiEvent::VolumeTo(percent) => self.set_volume(percent / 100.0),
            UiEvent::VolumeBy(delta) => self.set_volume((self.state.volume * 100.0 + delta) / 100.0),
            UiEvent::SelectRow(index) => self.select_row(index),
        }
    }

    pub fn handle_audio_event(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::PositionChanged | AudioEvent::MetadataLoaded => self.on_position_changed(),
            AudioEvent::Started => self.on_playback_started(),
            AudioEvent::Paused => self.on_playback_paused(),
            AudioEvent::Ended { generation } => self.on_playback_ended(generation),
            AudioEvent::PlayOutcome { request, outcome } => self.on_play_outcome(request, outcome),
        }
    }

    fn switch_to(&mut self, index: i64, resume: bool) {
        let index = self.playlist.wrap(index);

        self.audio.pause();
        self.state.is_playing = false;
        self.pending_play = None;

        self.state.current_index = index;
        self.loaded = self.audio.load(&self.playlist.get(index).source);
        debug!("loaded track {index} (generation {})", self.loaded);

        self.render_track_info();
        self.render_play_icon();
        self.on_position_changed();

        if resume {
            self.request_playback();
        }
    }

    fn pause_now(&mut self) {
        self.audio.pause();
        self.state.is_playing = false;
        self.pending_play = None;
        self.render_play_icon();
    }

    fn request_playback(&mut self) {
        let request = self.audio.request_play();
        debug!("{request:?} for track {}", self.state.current_index);
        self.pending_play = Some(request);
    }

    fn render_all(&mut self) {
        self.render_track_info();
        self.render_play_icon();
        self.render_volume();
        self.on_position_changed();
    }

    fn render_track_info(&mut self) {
        let index = self.state.current_index;
        let track = self.playlist.get(index);
        self.surface.set_track_info(&track.title, &track.artist);
        self.surface.set_active_row(index);
    }

    fn render_play_icon(&mut self) {
        self.surface.set_play_icon(if self.state.is_playing {
            PlayIcon::Pause
        } else {
            PlayIcon::Play
        });
    }

    fn render_volume(&mut self) {
        self.surface.set_mute_icon(if self.state.is_muted {
            MuteIcon::Muted
        } else {
            MuteIcon::Unmuted
        });
        self.surface.set_volume_slider(self.state.volume * 100.0);
    }
}
