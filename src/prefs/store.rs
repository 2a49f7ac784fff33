use std::collections::BTreeMap;
use std::path::PathBuf;
use std::{env, fmt, fs, io};

pub const THEME_KEY: &str = "theme";
pub const PRIMARY_COLOR_KEY: &str = "customPrimaryColor";
pub const BACKGROUND_COLOR_KEY: &str = "customBackgroundColor";
pub const SNOW_KEY: &str = "snowEffectEnabled";

#[derive(Debug)]
pub enum PrefsError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for PrefsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefsError::Io(e) => write!(f, "preferences i/o failed: {e}"),
            PrefsError::Parse(e) => write!(f, "preferences file is not valid TOML: {e}"),
            PrefsError::Serialize(e) => write!(f, "could not encode preferences: {e}"),
        }
    }
}

impl std::error::Error for PrefsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PrefsError::Io(e) => Some(e),
            PrefsError::Parse(e) => Some(e),
            PrefsError::Serialize(e) => Some(e),
        }
    }
}

impl From<io::Error> for PrefsError {
    fn from(e: io::Error) -> Self {
        PrefsError::Io(e)
    }
}

/// String key-value store backed by a TOML file.
///
/// Every `set` writes the whole file back. A store without a path
/// lives in memory only.
#[derive(Debug, Default)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl PreferenceStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => toml::from_str(&text).map_err(PrefsError::Parse)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: Some(path),
            values,
        })
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.into());
        self.persist()
    }

    fn persist(&self) -> Result<(), PrefsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string(&self.values).map_err(PrefsError::Serialize)?;
        fs::write(path, text)?;
        Ok(())
    }
}

/// Resolve the preferences file from `HOWL_PREFS_PATH` or the XDG state dir.
pub fn resolve_prefs_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("HOWL_PREFS_PATH") {
        return Some(PathBuf::from(p));
    }
    state_dir().map(|d| d.join("preferences.toml"))
}

/// `$XDG_STATE_HOME/howl`, or `~/.local/state/howl` when it is not set.
pub fn state_dir() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };
    state_home.map(|d| d.join("howl"))
}
