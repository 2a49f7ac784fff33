use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use log::warn;

use crate::config::AudioSettings;
use crate::player::{AudioEvent, AudioPrimitive, PlayRequest, PlaybackRejected};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo};

/// `AudioPrimitive` backed by the audio thread.
pub struct RodioPrimitive {
    tx: Sender<AudioCmd>,
    /// Used to answer play requests the thread can no longer receive.
    events: Sender<AudioEvent>,
    playback: PlaybackHandle,
    next_request: u64,
    generation: u64,
    join: Option<JoinHandle<()>>,
}

impl RodioPrimitive {
    /// Start the audio thread; the receiver yields its notifications.
    pub fn spawn(audio_settings: AudioSettings) -> (Self, Receiver<AudioEvent>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<AudioEvent>();
        let playback: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));
        let audio_handle =
            spawn_audio_thread(rx, events_tx.clone(), playback.clone(), audio_settings);

        let mut primitive = Self::from_parts(tx, events_tx, playback);
        primitive.join = Some(audio_handle);
        (primitive, events_rx)
    }

    pub(super) fn from_parts(
        tx: Sender<AudioCmd>,
        events: Sender<AudioEvent>,
        playback: PlaybackHandle,
    ) -> Self {
        Self {
            tx,
            events,
            playback,
            next_request: 0,
            generation: 0,
            join: None,
        }
    }

    fn send(&self, cmd: AudioCmd) -> bool {
        match self.tx.send(cmd) {
            Ok(()) => true,
            Err(e) => {
                warn!("audio thread is gone, dropped {:?}", e.0);
                false
            }
        }
    }

    /// Fade out, stop the thread and wait for it.
    pub fn quit_softly(&mut self, fade_out: Duration) {
        self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl AudioPrimitive for RodioPrimitive {
    fn load(&mut self, source: &Path) -> u64 {
        self.generation += 1;
        // Reset synchronously so reads right after a switch never show the
        // previous source's position or length.
        if let Ok(mut info) = self.playback.lock() {
            *info = PlaybackInfo {
                generation: self.generation,
                ..PlaybackInfo::default()
            };
        }
        self.send(AudioCmd::Load {
            source: source.to_path_buf(),
            generation: self.generation,
        });
        self.generation
    }

    fn request_play(&mut self) -> PlayRequest {
        self.next_request += 1;
        let request = PlayRequest(self.next_request);
        if !self.send(AudioCmd::Play(request)) {
            let _ = self.events.send(AudioEvent::PlayOutcome {
                request,
                outcome: Err(PlaybackRejected::BackendUnavailable),
            });
        }
        request
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn position(&self) -> Duration {
        self.playback
            .lock()
            .map(|info| info.position)
            .unwrap_or_default()
    }

    fn set_position(&mut self, position: Duration) {
        if let Ok(mut info) = self.playback.lock() {
            info.position = position;
        }
        self.send(AudioCmd::Seek(position));
    }

    fn duration(&self) -> Option<Duration> {
        self.playback.lock().ok().and_then(|info| info.duration)
    }

    fn set_volume(&mut self, volume: f64) {
        self.send(AudioCmd::SetVolume(volume.clamp(0.0, 1.0) as f32));
    }
}
