//! Utilities for creating `rodio` sinks from track sources.
//!
//! Opening and decoding failures come back as `PlaybackRejected` so the
//! player can stay paused instead of the thread going down.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::player::PlaybackRejected;

/// Open and decode `path`.
pub(super) fn open_source(path: &Path) -> Result<Decoder<BufReader<File>>, PlaybackRejected> {
    let file = File::open(path).map_err(|_| PlaybackRejected::MissingResource(path.to_path_buf()))?;
    Decoder::new(BufReader::new(file)).map_err(|_| PlaybackRejected::Undecodable(path.to_path_buf()))
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
///
/// Also returns the decoder's total duration when it knows one.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
    volume: f32,
) -> Result<(Sink, Option<Duration>), PlaybackRejected> {
    let decoder = open_source(path)?;
    let total = decoder.total_duration();
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok((sink, total))
}
