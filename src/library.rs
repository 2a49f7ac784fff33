//! Playlist sources: track model, directory scanning and config-defined tracks.
//!
//! The playlist is built once at startup and stays read-only for the whole
//! session; its order is the playback order.

mod entries;
mod model;
mod scan;

pub use entries::from_entries;
pub use model::*;
pub use scan::scan;
