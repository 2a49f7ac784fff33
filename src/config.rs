//! Configuration loader and schema types.
//!
//! This module exposes the settings that shape the page, the player and the
//! playlist, and helpers to load them from disk and the environment.

mod load;
mod schema;

pub use load::resolve_config_path;
pub use schema::*;
