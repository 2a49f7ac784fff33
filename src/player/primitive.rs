use std::path::Path;
use std::time::Duration;

/// Identifies one asynchronous play request.
///
/// The outcome comes back later as `AudioEvent::PlayOutcome` carrying the
/// same id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayRequest(pub u64);

/// A single-source audio playback resource.
///
/// Implementations never block: `request_play` only issues the request, and
/// every notification (`AudioEvent`) is delivered to the controller by
/// whoever owns the event loop.
pub trait AudioPrimitive {
    /// Switch to a new source. Position resets to zero and the duration is
    /// unknown until `AudioEvent::MetadataLoaded`.
    ///
    /// Returns the generation that later `AudioEvent::Ended` reports for this
    /// source carry.
    fn load(&mut self, source: &Path) -> u64;
    /// Ask to start playing the loaded source.
    fn request_play(&mut self) -> PlayRequest;
    fn pause(&mut self);
    fn position(&self) -> Duration;
    fn set_position(&mut self, position: Duration);
    /// Real duration of the loaded source, once known.
    fn duration(&self) -> Option<Duration>;
    fn set_volume(&mut self, volume: f64);
}
