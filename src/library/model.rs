use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Cover art availability for a track.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Artwork {
    /// The file carries an embedded picture of the given mime type.
    Embedded { mime: String },
    /// No picture could be read; the UI draws a placeholder instead.
    #[default]
    Missing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Opaque handle to the audio resource.
    pub source: PathBuf,
    pub title: String,
    pub artist: String,
    /// Used for progress until the decoder reports the real duration.
    pub nominal_duration: Duration,
    pub artwork: Artwork,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistError {
    Empty,
}

impl fmt::Display for PlaylistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaylistError::Empty => write!(f, "playlist has no tracks"),
        }
    }
}

impl std::error::Error for PlaylistError {}

/// An ordered, non-empty sequence of tracks.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Result<Self, PlaylistError> {
        if tracks.is_empty() {
            return Err(PlaylistError::Empty);
        }
        Ok(Self { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Map any signed index onto the playlist ring, so `-1` is the last
    /// track and `len()` is the first.
    pub fn wrap(&self, index: i64) -> usize {
        index.rem_euclid(self.tracks.len() as i64) as usize
    }

    /// Track at a wrapped `index`; always resolves.
    pub fn get(&self, index: usize) -> &Track {
        &self.tracks[index % self.tracks.len()]
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}
