//! The player widget: playback state, the collaborators it talks to and the
//! controller that keeps them consistent.
//!
//! `PlayerController` drives an `AudioPrimitive` (the thing that actually
//! makes sound) and writes everything the page shows into a `UiSurface`.
//! Both collaborators report back through `AudioEvent` / `UiEvent`, which the
//! runtime feeds into the controller on a single thread.

mod controller;
mod error;
mod events;
mod format;
mod primitive;
mod state;
mod surface;

pub use controller::*;
pub use error::*;
pub use events::*;
pub use format::*;
pub use primitive::*;
pub use state::*;
pub use surface::*;

#[cfg(test)]
mod tests;
