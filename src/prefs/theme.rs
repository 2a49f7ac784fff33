use log::warn;
use ratatui::style::Color;

use super::store::{
    BACKGROUND_COLOR_KEY, PRIMARY_COLOR_KEY, PreferenceStore, PrefsError, SNOW_KEY, THEME_KEY,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    /// The stored theme, or dark when nothing valid is stored.
    pub fn from_store(store: &PreferenceStore) -> Self {
        store
            .get(THEME_KEY)
            .and_then(Theme::parse)
            .unwrap_or_default()
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn save(self, store: &mut PreferenceStore) -> Result<(), PrefsError> {
        store.set(THEME_KEY, self.as_str())
    }

    /// Moon for dark, sun for light.
    pub fn glyph(self) -> &'static str {
        match self {
            Theme::Dark => "☾",
            Theme::Light => "☀",
        }
    }
}

/// Colors the page is drawn with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub background: Color,
    pub foreground: Color,
    pub dim: Color,
}

impl Palette {
    pub fn base(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                primary: Color::Rgb(0x8b, 0x5c, 0xf6),
                background: Color::Rgb(0x0f, 0x0f, 0x14),
                foreground: Color::Rgb(0xe6, 0xe6, 0xf0),
                dim: Color::Rgb(0x6b, 0x6b, 0x80),
            },
            Theme::Light => Self {
                primary: Color::Rgb(0x6d, 0x28, 0xd9),
                background: Color::Rgb(0xf7, 0xf7, 0xfb),
                foreground: Color::Rgb(0x1a, 0x1a, 0x24),
                dim: Color::Rgb(0x8a, 0x8a, 0x99),
            },
        }
    }

    /// Theme palette with any stored custom colors laid over it.
    pub fn resolve(theme: Theme, store: &PreferenceStore) -> Self {
        let mut palette = Self::base(theme);
        if let Some(c) = custom_color(store, PRIMARY_COLOR_KEY) {
            palette.primary = c;
        }
        if let Some(c) = custom_color(store, BACKGROUND_COLOR_KEY) {
            palette.background = c;
        }
        palette
    }
}

fn custom_color(store: &PreferenceStore, key: &str) -> Option<Color> {
    let raw = store.get(key)?;
    let parsed = parse_css_color(raw);
    if parsed.is_none() {
        warn!("ignoring {key}: {raw:?} is not a #rgb or #rrggbb color");
    }
    parsed
}

/// Parse a CSS hex color (`#rgb` or `#rrggbb`).
pub fn parse_css_color(s: &str) -> Option<Color> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize, len: usize| u8::from_str_radix(&hex[i * len..(i + 1) * len], 16).ok();
    match hex.len() {
        3 => {
            let (r, g, b) = (channel(0, 1)?, channel(1, 1)?, channel(2, 1)?);
            Some(Color::Rgb(r * 17, g * 17, b * 17))
        }
        6 => Some(Color::Rgb(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
        _ => None,
    }
}

pub fn snow_enabled(store: &PreferenceStore) -> bool {
    store.get(SNOW_KEY).map(str::trim) == Some("true")
}

pub fn set_snow_enabled(store: &mut PreferenceStore, enabled: bool) -> Result<(), PrefsError> {
    store.set(SNOW_KEY, if enabled { "true" } else { "false" })
}
