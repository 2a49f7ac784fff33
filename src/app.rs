//! Application module: the page model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds everything on the page
//! that is not the player itself: profile, theme, palette, snow and the
//! playlist cursor.

mod model;

pub use model::*;
