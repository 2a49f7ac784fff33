//! Persisted page preferences: a small string key-value store and the
//! theme/palette settings read from it.
//!
//! The key layout mirrors what the page has always stored: `theme`,
//! `customPrimaryColor`, `customBackgroundColor` and `snowEffectEnabled`.
//! Playback position and volume are never persisted.

mod store;
mod theme;

pub use store::*;
pub use theme::*;
