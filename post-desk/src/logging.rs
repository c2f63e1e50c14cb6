//! Tracing setup.
//!
//! The terminal belongs to the UI, so logs only ever go to a file.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context as _;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

const LOG_DIR_ENV: &str = "POST_DESK_LOG_DIR";
const LOG_FILE: &str = "post-desk.log";

/// Directory the user asked for, via config/CLI or `POST_DESK_LOG_DIR`.
pub fn explicit_log_dir(config: &LogConfig) -> Option<PathBuf> {
    config
        .dir
        .clone()
        .or_else(|| std::env::var_os(LOG_DIR_ENV).map(PathBuf::from))
}

fn default_log_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("post-desk"))
}

fn filter(config: &LogConfig, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("post_desk=trace,desk_nexus=trace,debug")
        } else {
            let level = &config.level;
            EnvFilter::new(format!("post_desk={level},desk_nexus={level},warn"))
        }
    })
}

fn open_log(dir: &Path) -> std::io::Result<(PathBuf, File)> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

/// Install a file subscriber and return the log file path.
///
/// A directory named in config, on the command line or in
/// `POST_DESK_LOG_DIR` must be usable. The cache-dir default is best effort:
/// when it cannot be opened logging stays disabled and `None` is returned.
pub fn init(config: &LogConfig, verbose: bool) -> anyhow::Result<Option<PathBuf>> {
    let opened = match explicit_log_dir(config) {
        Some(dir) => Some(
            open_log(&dir).with_context(|| format!("failed to open log file in {}", dir.display()))?,
        ),
        None => default_log_dir().and_then(|dir| open_log(&dir).ok()),
    };
    let Some((path, file)) = opened else {
        return Ok(None);
    };

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter(config, verbose))
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::info!(path = ?path, "tracing initialized");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_dir_wins() {
        let config = LogConfig {
            dir: Some(PathBuf::from("/var/log/post-desk")),
            ..LogConfig::default()
        };
        assert_eq!(explicit_log_dir(&config), Some(PathBuf::from("/var/log/post-desk")));
    }

    #[test]
    fn test_unusable_configured_dir_is_an_error() {
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let config = LogConfig {
            dir: Some(blocker.path().join("logs")),
            ..LogConfig::default()
        };
        let err = init(&config, false).unwrap_err();
        assert!(err.to_string().contains("failed to open log file"), "{err:#}");
    }
}
