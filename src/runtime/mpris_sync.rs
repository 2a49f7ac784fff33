use crate::mpris::MprisHandle;
use crate::player::NowPlaying;

pub fn update_mpris(mpris: &MprisHandle, now: &NowPlaying) {
    mpris.set_track_metadata(Some(now.index), Some(&now.track));
    mpris.set_length(Some(now.duration.as_micros() as i64).filter(|&micros| micros > 0));
    mpris.set_playback(now.play_state);
    mpris.set_volume(now.volume);
}
