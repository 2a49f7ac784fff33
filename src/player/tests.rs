use super::*;
use crate::library::{Artwork, Playlist, Track};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// In-memory primitive: records commands, lets the test decide outcomes.
#[derive(Default)]
struct FakeAudio {
    loaded: Vec<PathBuf>,
    requests: Vec<PlayRequest>,
    pauses: usize,
    position: Duration,
    duration: Option<Duration>,
    volume: f64,
}

impl AudioPrimitive for FakeAudio {
    fn load(&mut self, source: &Path) -> u64 {
        self.loaded.push(source.to_path_buf());
        self.position = Duration::ZERO;
        self.duration = None;
        self.loaded.len() as u64
    }

    fn request_play(&mut self) -> PlayRequest {
        let request = PlayRequest(self.requests.len() as u64 + 1);
        self.requests.push(request);
        request
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn set_position(&mut self, position: Duration) {
        self.position = position;
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }
}

type Controller = PlayerController<FakeAudio, SurfaceModel>;

fn track(name: &str, secs: u64) -> Track {
    Track {
        source: PathBuf::from(format!("assets/{name}.mp3")),
        title: name.to_string(),
        artist: format!("{name} artist"),
        nominal_duration: Duration::from_secs(secs),
        artwork: Artwork::Missing,
    }
}

fn controller_with(policy: EndOfTrackPolicy) -> Controller {
    let playlist = Playlist::new(vec![
        track("music", 100),
        track("music2", 83),
        track("music3", 221),
    ])
    .unwrap();
    PlayerController::new(
        playlist,
        FakeAudio::default(),
        SurfaceModel::default(),
        ControllerOptions {
            initial_volume: 0.5,
            end_of_track: policy,
        },
    )
}

fn controller() -> Controller {
    controller_with(EndOfTrackPolicy::Advance)
}

fn last_request(c: &Controller) -> PlayRequest {
    *c.audio().requests.last().unwrap()
}

/// End-of-source report for whatever is loaded right now.
fn ended(c: &Controller) -> AudioEvent {
    AudioEvent::Ended {
        generation: c.audio().loaded.len() as u64,
    }
}

/// Press play and let the environment accept it.
fn start_playing(c: &mut Controller) {
    c.toggle_playback();
    let request = last_request(c);
    c.on_play_outcome(request, Ok(()));
    c.on_playback_started();
}

#[test]
fn new_controller_starts_paused_on_first_track() {
    let c = controller();
    assert_eq!(c.state().current_index, 0);
    assert_eq!(c.state().play_state(), PlayState::Paused);
    assert_eq!(c.audio().loaded, vec![PathBuf::from("assets/music.mp3")]);
    assert_eq!(c.audio().volume, 0.5);

    let s = c.surface();
    assert_eq!(s.title, "music");
    assert_eq!(s.artist, "music artist");
    assert_eq!(s.play_icon, PlayIcon::Play);
    assert_eq!(s.mute_icon, MuteIcon::Unmuted);
    assert_eq!(s.volume, 50.0);
    assert_eq!(s.current_time, "0:00");
    assert_eq!(s.duration, "1:40");
    assert_eq!(s.active_row, 0);
}

#[test]
fn next_three_times_wraps_around() {
    let mut c = controller();
    let mut seen = Vec::new();
    for _ in 0..3 {
        c.next();
        seen.push(c.state().current_index);
    }
    assert_eq!(seen, vec![1, 2, 0]);
    assert_eq!(c.surface().active_row, 0);
}

#[test]
fn previous_from_first_lands_on_last() {
    let mut c = controller();
    c.previous();
    assert_eq!(c.state().current_index, 2);
    assert_eq!(c.surface().title, "music3");
    assert_eq!(c.surface().duration, "3:41");
}

#[test]
fn load_track_wraps_any_offset() {
    let mut c = controller();
    for start in 0..3i64 {
        for k in -7..7i64 {
            c.load_track(start);
            c.load_track(start + k);
            assert_eq!(c.state().current_index, (start + k).rem_euclid(3) as usize);
        }
    }
}

#[test]
fn switching_while_paused_stays_paused() {
    let mut c = controller();
    c.next();
    assert!(c.audio().requests.is_empty());
    assert!(!c.state().is_playing);
    assert_eq!(c.audio().loaded.last().unwrap(), &PathBuf::from("assets/music2.mp3"));
}

#[test]
fn switching_while_playing_resumes_on_new_track() {
    let mut c = controller();
    start_playing(&mut c);

    c.next();
    // Stopped synchronously, resume requested for the new source.
    assert!(!c.state().is_playing);
    assert_eq!(c.surface().play_icon, PlayIcon::Play);
    assert_eq!(c.audio().requests.len(), 2);
    assert!(c.is_play_pending());

    let request = last_request(&c);
    c.on_playback_paused();
    c.on_play_outcome(request, Ok(()));
    c.on_playback_started();
    assert!(c.state().is_playing);
    assert_eq!(c.state().current_index, 1);
    assert_eq!(c.surface().play_icon, PlayIcon::Pause);
}

#[test]
fn rejected_resume_after_switch_leaves_player_paused() {
    let mut c = controller();
    start_playing(&mut c);
    c.next();

    let request = last_request(&c);
    c.on_play_outcome(
        request,
        Err(PlaybackRejected::MissingResource("assets/music2.mp3".into())),
    );
    assert!(!c.state().is_playing);
    assert!(!c.is_play_pending());
    assert_eq!(c.surface().play_icon, PlayIcon::Play);
}

#[test]
fn toggle_twice_returns_to_paused_with_same_volume() {
    let mut c = controller();
    c.set_volume(0.7);
    let before = c.state().clone();

    start_playing(&mut c);
    assert_eq!(c.state().play_state(), PlayState::Playing);
    assert_eq!(c.surface().play_icon, PlayIcon::Pause);

    c.toggle_playback();
    assert_eq!(c.state().play_state(), PlayState::Paused);
    assert_eq!(c.surface().play_icon, PlayIcon::Play);
    assert_eq!(c.state(), &before);
}

#[test]
fn play_is_not_marked_until_accepted() {
    let mut c = controller();
    c.toggle_playback();
    assert!(!c.state().is_playing);
    assert_eq!(c.surface().play_icon, PlayIcon::Play);
    assert!(c.is_play_pending());

    // A second press while the request is in flight does not stack requests.
    c.toggle_playback();
    assert_eq!(c.audio().requests.len(), 1);
}

#[test]
fn rejected_play_stays_paused_and_advises_once() {
    let mut c = controller();

    c.toggle_playback();
    let first = last_request(&c);
    c.on_play_outcome(first, Err(PlaybackRejected::NoOutputDevice("none".into())));

    assert_eq!(c.state().play_state(), PlayState::Paused);
    assert_eq!(c.surface().play_icon, PlayIcon::Play);
    assert!(!c.is_play_pending());
    assert!(c.surface().notice.is_some());

    // Only one advisory per session; acceptance clears it.
    c.handle_ui_event(UiEvent::Play);
    let second = last_request(&c);
    c.on_play_outcome(second, Ok(()));
    assert!(c.state().is_playing);
    assert_eq!(c.surface().notice, None);

    c.toggle_playback();
    c.toggle_playback();
    let third = last_request(&c);
    c.on_play_outcome(third, Err(PlaybackRejected::NoSource));
    assert_eq!(c.surface().notice, None);
    assert!(!c.state().is_playing);
}

#[test]
fn late_acceptance_does_not_override_explicit_pause() {
    let mut c = controller();
    c.toggle_playback();
    let request = last_request(&c);

    c.handle_ui_event(UiEvent::Pause);
    let pauses_before = c.audio().pauses;

    c.on_play_outcome(request, Ok(()));
    c.on_playback_started();

    assert!(!c.state().is_playing);
    assert_eq!(c.surface().play_icon, PlayIcon::Play);
    // The accepted start is stopped again.
    assert_eq!(c.audio().pauses, pauses_before + 1);
}

#[test]
fn outcome_of_superseded_request_is_ignored_while_newer_is_pending() {
    let mut c = controller();
    c.toggle_playback();
    let old = last_request(&c);
    c.next();
    c.toggle_playback();
    let newer = last_request(&c);
    assert_ne!(old, newer);

    let pauses_before = c.audio().pauses;
    c.on_play_outcome(old, Ok(()));
    assert_eq!(c.audio().pauses, pauses_before);
    assert!(c.is_play_pending());

    c.on_play_outcome(newer, Ok(()));
    assert!(c.state().is_playing);
}

#[test]
fn mute_round_trip_restores_exact_volume() {
    for v in [0.0, 0.123456789, 0.5, 0.999, 1.0] {
        let mut c = controller();
        c.set_volume(v);

        c.toggle_mute();
        assert!(c.state().is_muted);
        assert_eq!(c.audio().volume, 0.0);
        assert_eq!(c.surface().volume, 0.0);
        assert_eq!(c.surface().mute_icon, MuteIcon::Muted);

        c.toggle_mute();
        assert!(!c.state().is_muted);
        assert_eq!(c.state().volume, v);
        assert_eq!(c.audio().volume, v);
        assert_eq!(c.surface().volume, v * 100.0);
        assert_eq!(c.surface().mute_icon, MuteIcon::Unmuted);
    }
}

#[test]
fn audible_volume_clears_mute_but_zero_does_not_set_it() {
    let mut c = controller();
    c.set_volume(0.0);
    assert!(!c.state().is_muted);

    c.set_volume(0.4);
    c.toggle_mute();
    c.set_volume(0.0);
    assert!(c.state().is_muted);

    c.set_volume(0.3);
    assert!(!c.state().is_muted);
    assert_eq!(c.audio().volume, 0.3);
    assert_eq!(c.surface().mute_icon, MuteIcon::Unmuted);
}

#[test]
fn volume_slider_input_is_percent_and_clamped() {
    let mut c = controller();
    c.handle_ui_event(UiEvent::VolumeTo(80.0));
    assert_eq!(c.state().volume, 0.8);

    c.handle_ui_event(UiEvent::VolumeTo(250.0));
    assert_eq!(c.state().volume, 1.0);

    c.handle_ui_event(UiEvent::VolumeBy(-150.0));
    assert_eq!(c.state().volume, 0.0);
}

#[test]
fn seek_uses_real_duration_when_known() {
    let mut c = controller();
    c.audio_mut().duration = Some(Duration::from_secs(204));
    c.seek(50.0);
    assert_eq!(c.audio().position, Duration::from_secs(102));
    assert_eq!(c.surface().progress, 50.0);
    assert_eq!(c.surface().current_time, "1:42");
    assert_eq!(c.surface().duration, "3:24");
}

#[test]
fn seek_falls_back_to_nominal_duration() {
    let mut c = controller();
    c.seek(25.0);
    assert_eq!(c.audio().position, Duration::from_secs(25));

    c.handle_ui_event(UiEvent::SeekBy(10.0));
    assert_eq!(c.audio().position, Duration::from_secs(35));

    c.seek(-5.0);
    assert_eq!(c.audio().position, Duration::ZERO);
}

#[test]
fn progress_is_clamped_when_position_overshoots() {
    let mut c = controller();
    c.audio_mut().duration = Some(Duration::from_secs(100));
    c.audio_mut().position = Duration::from_millis(100_400);
    c.on_position_changed();
    assert_eq!(c.surface().progress, 100.0);
}

#[test]
fn metadata_replaces_nominal_duration_label() {
    let mut c = controller();
    assert_eq!(c.surface().duration, "1:40");

    c.audio_mut().duration = Some(Duration::from_secs(98));
    c.handle_audio_event(AudioEvent::MetadataLoaded);
    assert_eq!(c.surface().duration, "1:38");
}

#[test]
fn ended_with_advance_policy_plays_next_track() {
    let mut c = controller_with(EndOfTrackPolicy::Advance);
    c.load_track(2);
    start_playing(&mut c);

    c.handle_audio_event(ended(&c));
    assert_eq!(c.state().current_index, 0);
    assert!(c.is_play_pending());

    let request = last_request(&c);
    c.handle_audio_event(AudioEvent::PlayOutcome {
        request,
        outcome: Ok(()),
    });
    assert!(c.state().is_playing);
}

#[test]
fn ended_with_stop_policy_rewinds_and_pauses() {
    let mut c = controller_with(EndOfTrackPolicy::Stop);
    start_playing(&mut c);
    c.audio_mut().position = Duration::from_secs(100);

    c.handle_audio_event(ended(&c));
    assert_eq!(c.state().current_index, 0);
    assert!(!c.state().is_playing);
    assert_eq!(c.audio().position, Duration::ZERO);
    assert_eq!(c.surface().progress, 0.0);
    assert_eq!(c.surface().play_icon, PlayIcon::Play);
}

#[test]
fn selecting_a_row_loads_that_track() {
    let mut c = controller();
    c.handle_ui_event(UiEvent::SelectRow(2));
    assert_eq!(c.state().current_index, 2);
    assert_eq!(c.surface().active_row, 2);
}

#[test]
fn pause_notification_always_reflects_actual_state() {
    let mut c = controller();
    start_playing(&mut c);
    c.handle_audio_event(AudioEvent::Paused);
    assert!(!c.state().is_playing);
    assert_eq!(c.surface().play_icon, PlayIcon::Play);
}

#[test]
fn format_clock_pads_seconds_only() {
    assert_eq!(format_clock(Duration::ZERO), "0:00");
    assert_eq!(format_clock(Duration::from_secs(83)), "1:23");
    assert_eq!(format_clock(Duration::from_millis(221_900)), "3:41");
    assert_eq!(format_clock(Duration::from_secs(3600)), "60:00");
}

#[test]
fn progress_percent_handles_unknown_length() {
    assert_eq!(progress_percent(Duration::from_secs(5), Duration::ZERO), 0.0);
    assert_eq!(
        progress_percent(Duration::from_secs(50), Duration::from_secs(200)),
        25.0
    );
}

#[test]
fn snapshot_follows_track_and_play_state() {
    let mut c = controller();
    let before = c.snapshot();
    assert_eq!(before.index, 0);
    assert_eq!(before.play_state, PlayState::Paused);
    assert_eq!(before.duration, Duration::from_secs(100));

    start_playing(&mut c);
    c.next();
    c.audio_mut().duration = Some(Duration::from_secs(80));
    let after = c.snapshot();
    assert_eq!(after.index, 1);
    assert_eq!(after.track.title, "music2");
    assert_eq!(after.duration, Duration::from_secs(80));
    assert_ne!(before, after);
}

#[test]
fn end_of_track_queued_behind_a_pause_does_not_resume() {
    let mut c = controller();
    start_playing(&mut c);
    let end = ended(&c);

    c.toggle_playback();
    c.handle_audio_event(end);

    assert_eq!(c.state().current_index, 0);
    assert!(!c.state().is_playing);
    assert!(!c.is_play_pending());
    assert_eq!(c.audio().requests.len(), 1);
    assert_eq!(c.surface().play_icon, PlayIcon::Play);
}

#[test]
fn end_of_replaced_track_does_not_skip_another() {
    let mut c = controller();
    start_playing(&mut c);
    let end = ended(&c);

    c.next();
    c.handle_audio_event(end);
    assert_eq!(c.state().current_index, 1);

    // The new track's own end still advances.
    let end = ended(&c);
    c.handle_audio_event(end);
    assert_eq!(c.state().current_index, 2);
}

#[test]
fn absolute_slider_and_row_events() {
    let mut c = controller();
    c.handle_ui_event(UiEvent::SeekTo(50.0));
    assert_eq!(c.audio().position, Duration::from_secs(50));
    assert_eq!(c.surface().progress, 50.0);

    c.handle_ui_event(UiEvent::VolumeTo(25.0));
    assert_eq!(c.state().volume, 0.25);
    assert_eq!(c.surface().volume, 25.0);

    c.handle_ui_event(UiEvent::SelectRow(2));
    assert_eq!(c.state().current_index, 2);
    assert_eq!(c.surface().title, "music3");
}
