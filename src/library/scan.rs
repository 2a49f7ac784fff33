use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Artwork, Track};

pub(super) const UNKNOWN_ARTIST: &str = "Unknown artist";

/// Whatever `lofty` could read from a file.
#[derive(Debug, Default)]
pub(super) struct Probe {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub duration: Option<Duration>,
    pub artwork: Artwork,
}

fn non_blank(v: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub(super) fn probe(path: &Path) -> Probe {
    let Ok(tagged) = lofty::read_from_path(path) else {
        return Probe::default();
    };

    let mut probe = Probe {
        duration: Some(tagged.properties().duration()).filter(|d| !d.is_zero()),
        ..Probe::default()
    };

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        probe.title = non_blank(tag.title());
        probe.artist = non_blank(tag.artist());
        if let Some(picture) = tag.pictures().first() {
            let mime = picture
                .mime_type()
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "image".to_string());
            probe.artwork = Artwork::Embedded { mime };
        }
    }

    probe
}

pub(super) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Collect the audio files under `dir` as tracks, ordered by file name.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut files: Vec<_> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_audio_file(p, settings))
        .collect();

    files.sort_by_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });

    files
        .into_iter()
        .map(|path| {
            let probe = probe(&path);
            Track {
                title: probe.title.unwrap_or_else(|| file_stem(&path)),
                artist: probe.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
                nominal_duration: probe.duration.unwrap_or_default(),
                artwork: probe.artwork,
                source: path,
            }
        })
        .collect()
}
