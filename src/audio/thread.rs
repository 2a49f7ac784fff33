use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;
use crate::player::{AudioEvent, PlayRequest, PlaybackRejected};

use super::sink::create_sink_at;
use super::types::{AudioCmd, PlaybackHandle};

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    playback_info: PlaybackHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in
                // debugging, but noisy for a TUI app.
                stream.log_on_drop(false);
                Ok(stream)
            }
            Err(e) => {
                warn!("no audio output device: {e}");
                Err(e.to_string())
            }
        };

        let mut deck = Deck::new(
            stream,
            events,
            playback_info,
            audio_settings.initial_volume.clamp(0.0, 1.0) as f32,
        );

        let tick = Duration::from_millis(audio_settings.tick_ms.max(1));
        loop {
            match rx.recv_timeout(tick) {
                Ok(AudioCmd::Load { source, generation }) => deck.load(source, generation),
                Ok(AudioCmd::Play(request)) => deck.play(request),
                Ok(AudioCmd::Pause) => deck.pause(),
                Ok(AudioCmd::Seek(position)) => deck.seek(position),
                Ok(AudioCmd::SetVolume(volume)) => deck.set_volume(volume),
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    deck.quit(fade_out_ms);
                    break;
                }
                Err(RecvTimeoutError::Timeout) => deck.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

/// Everything the audio thread owns.
struct Deck {
    stream: Result<OutputStream, String>,
    events: Sender<AudioEvent>,
    info: PlaybackHandle,

    source: Option<PathBuf>,
    generation: u64,
    sink: Option<Sink>,
    total: Option<Duration>,

    paused: bool,
    // Track start time and accumulated elapsed when paused.
    started_at: Option<Instant>,
    accumulated: Duration,
    volume: f32,
}

impl Deck {
    fn new(
        stream: Result<OutputStream, String>,
        events: Sender<AudioEvent>,
        info: PlaybackHandle,
        volume: f32,
    ) -> Self {
        Self {
            stream,
            events,
            info,
            source: None,
            generation: 0,
            sink: None,
            total: None,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
            volume,
        }
    }

    fn emit(&self, event: AudioEvent) {
        let _ = self.events.send(event);
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    /// Write our view into the shared handle unless the primitive has already
    /// moved on to a newer source.
    fn publish(&self) {
        if let Ok(mut info) = self.info.lock() {
            if info.generation != self.generation {
                return;
            }
            info.position = self.elapsed();
            info.duration = self.total;
        }
    }

    fn stop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    /// Rebuild the sink at `start_at`, paused.
    fn prepare(&mut self, start_at: Duration) -> Result<(), PlaybackRejected> {
        let stream = self
            .stream
            .as_ref()
            .map_err(|e| PlaybackRejected::NoOutputDevice(e.clone()))?;
        let source = self.source.as_ref().ok_or(PlaybackRejected::NoSource)?;

        let (sink, total) = create_sink_at(stream, source, start_at, self.volume)?;
        self.stop_sink();
        self.sink = Some(sink);
        if total.is_some() {
            self.total = total;
        }
        Ok(())
    }

    fn load(&mut self, source: PathBuf, generation: u64) {
        self.stop_sink();
        self.source = Some(source);
        self.generation = generation;
        self.total = None;
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;

        // Decode eagerly so the real duration shows up before playback starts;
        // failures surface when play is requested.
        match self.prepare(Duration::ZERO) {
            Ok(()) => {
                self.publish();
                if self.total.is_some() {
                    self.emit(AudioEvent::MetadataLoaded);
                }
            }
            Err(e) => debug!("source not ready: {e}"),
        }
    }

    fn start(&mut self) -> Result<(), PlaybackRejected> {
        let drained = self.sink.as_ref().is_none_or(|s| s.empty());
        if drained {
            if self.sink.is_some() {
                // Played to the end: start over.
                self.accumulated = Duration::ZERO;
            }
            self.prepare(self.accumulated)?;
        }

        if let Some(sink) = &self.sink {
            sink.play();
        }
        if self.paused {
            self.paused = false;
            self.started_at = Some(Instant::now());
        }
        Ok(())
    }

    fn play(&mut self, request: PlayRequest) {
        let was_paused = self.paused;
        let outcome = self.start();
        let started = outcome.is_ok() && was_paused;
        self.emit(AudioEvent::PlayOutcome { request, outcome });
        if started {
            self.publish();
            self.emit(AudioEvent::Started);
        }
    }

    fn pause(&mut self) {
        if let Some(s) = &self.sink {
            s.pause();
        }
        if self.paused {
            return;
        }
        self.accumulated = self.elapsed();
        self.started_at = None;
        self.paused = true;
        self.publish();
        self.emit(AudioEvent::Paused);
    }

    fn seek(&mut self, position: Duration) {
        if self.source.is_none() {
            return;
        }
        self.accumulated = position;
        if let Err(e) = self.prepare(position) {
            debug!("seek could not rebuild the sink: {e}");
        } else if !self.paused {
            if let Some(s) = &self.sink {
                s.play();
            }
        }
        self.started_at = if self.paused {
            None
        } else {
            Some(Instant::now())
        };
        self.publish();
        self.emit(AudioEvent::PositionChanged);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(s) = &self.sink {
            s.set_volume(self.volume);
        }
    }

    fn tick(&mut self) {
        if self.paused {
            return;
        }
        let drained = self.sink.as_ref().is_none_or(|s| s.empty());
        if drained {
            self.accumulated = self.total.unwrap_or_else(|| self.elapsed());
            self.started_at = None;
            self.paused = true;
            self.publish();
            self.emit(AudioEvent::Ended {
                generation: self.generation,
            });
        } else {
            self.publish();
            self.emit(AudioEvent::PositionChanged);
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(s) = &self.sink {
            if !self.paused {
                // Fade out gently before stopping.
                fade_out_sink(s, self.volume, fade_out_ms);
            }
            s.stop();
        }
        self.paused = true;
        self.started_at = None;
        // Freeze the reported position where playback stopped.
        self.publish();
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::types::PlaybackInfo;
    use std::sync::mpsc::{self, Receiver};
    use std::sync::{Arc, Mutex};

    fn deck_without_device() -> (Deck, Receiver<AudioEvent>, PlaybackHandle) {
        let (tx, rx) = mpsc::channel();
        let info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));
        let deck = Deck::new(Err("no device".to_string()), tx, info.clone(), 0.5);
        (deck, rx, info)
    }

    #[test]
    fn play_without_output_device_is_rejected_and_never_started() {
        let (mut deck, events, info) = deck_without_device();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("music.mp3");
        std::fs::write(&path, b"not audio").unwrap();

        deck.load(path, 1);
        // Nothing decodable yet, so no duration announcement.
        assert!(events.try_recv().is_err());

        deck.play(PlayRequest(3));
        assert_eq!(
            events.try_recv().unwrap(),
            AudioEvent::PlayOutcome {
                request: PlayRequest(3),
                outcome: Err(PlaybackRejected::NoOutputDevice("no device".to_string())),
            }
        );
        assert!(events.try_recv().is_err());
        assert!(deck.paused);
        assert!(deck.started_at.is_none());
    }

    #[test]
    fn tick_reports_end_once_when_drained() {
        let (mut deck, events, info) = deck_without_device();
        deck.generation = 4;
        info.lock().unwrap().generation = 4;
        deck.total = Some(Duration::from_secs(10));
        deck.paused = false;
        deck.started_at = Some(Instant::now());

        deck.tick();
        assert_eq!(events.try_recv().unwrap(), AudioEvent::Ended { generation: 4 });
        assert!(deck.paused);
        assert_eq!(deck.accumulated, Duration::from_secs(10));
        assert_eq!(info.lock().unwrap().position, Duration::from_secs(10));

        deck.tick();
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn publish_leaves_newer_generation_alone() {
        let (mut deck, _events, info) = deck_without_device();
        deck.generation = 4;
        deck.accumulated = Duration::from_secs(30);
        deck.total = Some(Duration::from_secs(60));
        info.lock().unwrap().generation = 5;

        deck.publish();
        assert_eq!(
            *info.lock().unwrap(),
            PlaybackInfo {
                generation: 5,
                ..PlaybackInfo::default()
            }
        );

        info.lock().unwrap().generation = 4;
        deck.publish();
        let published = info.lock().unwrap().clone();
        assert_eq!(published.position, Duration::from_secs(30));
        assert_eq!(published.duration, Some(Duration::from_secs(60)));
    }

    #[test]
    fn pause_banks_elapsed_time_and_reports_once() {
        let (mut deck, events, _info) = deck_without_device();
        deck.paused = false;
        deck.accumulated = Duration::from_secs(1);
        deck.started_at = Instant::now().checked_sub(Duration::from_secs(2));

        deck.pause();
        assert!(deck.paused);
        assert!(deck.started_at.is_none());
        assert!(deck.accumulated >= Duration::from_secs(3));
        assert_eq!(events.try_recv().unwrap(), AudioEvent::Paused);

        let banked = deck.accumulated;
        deck.pause();
        assert_eq!(deck.accumulated, banked);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn seek_while_paused_moves_position_without_starting() {
        let (mut deck, events, info) = deck_without_device();
        deck.source = Some(std::path::PathBuf::from("/nowhere/music.mp3"));

        deck.seek(Duration::from_secs(42));
        assert_eq!(events.try_recv().unwrap(), AudioEvent::PositionChanged);
        assert_eq!(info.lock().unwrap().position, Duration::from_secs(42));
        assert!(deck.paused);
        assert!(deck.started_at.is_none());
    }
}
