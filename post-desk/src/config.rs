//! Configuration file handling.
//!
//! ```toml
//! base = "index.html"
//! initial_hash = "#/calendar"
//! tick_rate_ms = 100
//!
//! [log]
//! level = "debug"
//! dir = "/tmp/post-desk"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context as _};
use desk_nexus::parse_location;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Text in front of `#` in displayed hrefs.
    pub base: String,
    /// Location opened at startup.
    pub initial_hash: String,
    /// Input poll interval.
    pub tick_rate_ms: u64,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub level: String,
    pub dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base: String::new(),
            initial_hash: "#/".to_string(),
            tick_rate_ms: 100,
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

impl Config {
    /// `<config dir>/post-desk/config.toml`, when the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("post-desk").join("config.toml"))
    }

    /// Load from `path`, or from [`default_path`](Self::default_path) when
    /// `None`. A missing default file yields the defaults; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        if config.tick_rate_ms == 0 {
            bail!("tick_rate_ms must be greater than zero");
        }
        Ok(config)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// The page URL the history starts from, e.g. `index.html#/calendar`.
    pub fn initial_url(&self) -> String {
        format!("{}#{}", self.base, parse_location(&self.initial_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base = \"index.html\"\ninitial_hash = \"#/calendar\"\ntick_rate_ms = 50\n\n[log]\nlevel = \"debug\""
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.initial_url(), "index.html#/calendar");
        assert_eq!(config.tick_rate(), Duration::from_millis(50));
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.dir, None);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(Config::from_toml("colour = \"blue\"").is_err());
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        assert!(Config::from_toml("tick_rate_ms = 0").is_err());
    }

    #[test]
    fn test_initial_url_normalizes_hash() {
        let config = Config {
            initial_hash: "feed-importer".to_string(),
            ..Config::default()
        };
        assert_eq!(config.initial_url(), "#/feed-importer");
    }
}
