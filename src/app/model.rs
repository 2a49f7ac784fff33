//! Page model: `App`.

use log::{debug, warn};

use crate::config::ProfileSettings;
use crate::prefs::{Palette, PreferenceStore, Theme, set_snow_enabled, snow_enabled};
use crate::ui::Snowfall;

/// Everything on the page besides the player widget.
pub struct App {
    pub profile: ProfileSettings,
    pub theme: Theme,
    pub palette: Palette,
    pub snow_enabled: bool,
    pub snow: Snowfall,
    /// Playlist row under the cursor.
    pub cursor: usize,
    track_count: usize,
    prefs: PreferenceStore,
}

impl App {
    /// Build the page from stored preferences.
    pub fn new(
        profile: ProfileSettings,
        prefs: PreferenceStore,
        track_count: usize,
        snow_flakes: usize,
    ) -> Self {
        let theme = Theme::from_store(&prefs);
        Self {
            profile,
            theme,
            palette: Palette::resolve(theme, &prefs),
            snow_enabled: snow_enabled(&prefs),
            snow: Snowfall::new(snow_flakes),
            cursor: 0,
            track_count,
            prefs,
        }
    }

    /// Flip dark/light and remember the choice.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.palette = Palette::resolve(self.theme, &self.prefs);
        if let Err(e) = self.theme.save(&mut self.prefs) {
            warn!("could not save theme: {e}");
        }
        debug!("theme is now {}", self.theme.as_str());
    }

    pub fn toggle_snow(&mut self) {
        self.snow_enabled = !self.snow_enabled;
        if !self.snow_enabled {
            self.snow.clear();
        }
        if let Err(e) = set_snow_enabled(&mut self.prefs, self.snow_enabled) {
            warn!("could not save snow preference: {e}");
        }
    }

    /// Advance the snowfall one step inside a `width` x `height` area.
    pub fn tick_snow(&mut self, width: u16, height: u16) {
        if self.snow_enabled {
            self.snow.tick(width, height, &mut rand::rng());
        }
    }

    /// Move the cursor down, wrapping to the first row.
    pub fn cursor_down(&mut self) {
        if self.track_count > 0 {
            self.cursor = (self.cursor + 1) % self.track_count;
        }
    }

    /// Move the cursor up, wrapping to the last row.
    pub fn cursor_up(&mut self) {
        if self.track_count > 0 {
            self.cursor = (self.cursor + self.track_count - 1) % self.track_count;
        }
    }

    /// Put the cursor on the now-playing row.
    pub fn follow(&mut self, index: usize) {
        if index < self.track_count {
            self.cursor = index;
        }
    }
}
