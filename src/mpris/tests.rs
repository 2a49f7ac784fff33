use super::*;
use crate::library::Artwork;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

fn make_track() -> Track {
    Track {
        source: PathBuf::from("/tmp/music/test.mp3"),
        title: "Test Title".to_string(),
        artist: "Test Artist".to_string(),
        nominal_duration: Duration::from_micros(1_234_567),
        artwork: Artwork::Missing,
    }
}

#[test]
fn set_track_metadata_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    let track = make_track();
    handle.set_track_metadata(Some(7), Some(&track));

    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Test Title"));
        assert_eq!(s.artist, vec!["Test Artist".to_string()]);
        assert!(s.url.as_deref().unwrap().contains("/tmp/music/test.mp3"));
        assert_eq!(s.length_micros, Some(1_234_567));
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/7")
        );
    }

    handle.set_track_metadata(None, None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert!(s.artist.is_empty());
        assert_eq!(s.url, None);
        assert_eq!(s.length_micros, None);
        assert!(s.track_id.is_none());
    }
}

#[test]
fn playback_status_maps_play_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    assert_eq!(iface.playback_status(), "Paused");

    state.lock().unwrap().playback = PlayState::Playing;
    assert_eq!(iface.playback_status(), "Playing");
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };
    let handle = MprisHandle {
        state: state.clone(),
    };
    handle.set_track_metadata(Some(1), Some(&make_track()));

    let map = iface.metadata();
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:url",
        "mpris:length",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn player_methods_forward_control_commands() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    iface.play_pause();
    iface.next();
    iface.stop();
    assert_eq!(rx.try_recv().unwrap(), ControlCmd::PlayPause);
    assert_eq!(rx.try_recv().unwrap(), ControlCmd::Next);
    assert_eq!(rx.try_recv().unwrap(), ControlCmd::Stop);
}

#[test]
fn control_commands_map_onto_page_events() {
    assert_eq!(ControlCmd::Quit.to_ui_event(), None);
    assert_eq!(ControlCmd::Play.to_ui_event(), Some(UiEvent::Play));
    assert_eq!(ControlCmd::Stop.to_ui_event(), Some(UiEvent::Pause));
    assert_eq!(
        ControlCmd::PlayPause.to_ui_event(),
        Some(UiEvent::TogglePlayback)
    );
    assert_eq!(ControlCmd::Prev.to_ui_event(), Some(UiEvent::Previous));
}

#[test]
fn volume_property_reads_state_and_forwards_writes() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let handle = MprisHandle {
        state: state.clone(),
    };
    let mut iface = PlayerIface { tx, state };

    handle.set_volume(0.75);
    assert_eq!(iface.volume(), 0.75);

    iface.set_volume(0.25);
    assert_eq!(rx.try_recv().unwrap(), ControlCmd::SetVolume(0.25));
    assert_eq!(
        ControlCmd::SetVolume(0.25).to_ui_event(),
        Some(UiEvent::VolumeTo(25.0))
    );
}
