use std::path::Path;
use std::time::Duration;

use crate::config::TrackEntry;

use super::model::Track;
use super::scan::{UNKNOWN_ARTIST, file_stem, probe};

/// Turn `[[playlist.tracks]]` entries into tracks, keeping their order.
///
/// Relative `file` paths resolve against `base`. Values written in the config
/// win over tags read from the file.
pub fn from_entries(entries: &[TrackEntry], base: &Path) -> Vec<Track> {
    entries
        .iter()
        .map(|entry| {
            let source = if entry.file.is_absolute() {
                entry.file.clone()
            } else {
                base.join(&entry.file)
            };

            // Artwork only ever comes from the file itself.
            let tags = probe(&source);

            Track {
                title: entry
                    .title
                    .clone()
                    .or(tags.title)
                    .unwrap_or_else(|| file_stem(&source)),
                artist: entry
                    .artist
                    .clone()
                    .or(tags.artist)
                    .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
                nominal_duration: entry
                    .duration_secs
                    .map(Duration::from_secs)
                    .or(tags.duration)
                    .unwrap_or_default(),
                artwork: tags.artwork,
                source,
            }
        })
        .collect()
}
