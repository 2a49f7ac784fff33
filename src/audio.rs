//! `rodio` playback backend.
//!
//! A dedicated thread owns the output stream and the sink; `RodioPrimitive`
//! talks to it over a command channel and exposes it to the player as an
//! `AudioPrimitive`. Notifications flow back as `AudioEvent`s on a second
//! channel drained by the runtime.

mod player;
mod sink;
mod thread;
mod types;

pub use player::RodioPrimitive;
pub use types::*;
