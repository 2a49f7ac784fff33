use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::Context;

use crate::config::LoggingSettings;
use crate::prefs::state_dir;

/// Where log lines go: `logging.file`, else `howl.log` in the state dir.
pub fn log_path(settings: &LoggingSettings) -> Option<PathBuf> {
    settings
        .file
        .clone()
        .or_else(|| state_dir().map(|d| d.join("howl.log")))
}

/// Send `log` records to a file; the terminal belongs to the TUI.
///
/// `logging.level` sets the filter and `RUST_LOG`, when present, is applied on top.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    let path = log_path(settings).context("no log file location (HOME is not set)")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::new()
        .parse_filters(&settings.level)
        .parse_env("RUST_LOG")
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;
    Ok(())
}
