//! Application configuration.
//!
//! An optional `config.toml` in the config directory tunes timing. Missing
//! keys fall back to defaults; command-line flags override the file.
//! User settings (protocol, kill switch...) are deliberately not read from here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::Result;

/// Timing configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Milliseconds between UI ticks.
    pub tick_rate_ms: u64,
    /// Simulated connect delay in milliseconds.
    pub connect_delay_ms: u64,
    /// Toast lifetime in milliseconds.
    pub toast_duration_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: constants::DEFAULT_TICK_RATE_MS,
            connect_delay_ms: constants::DEFAULT_CONNECT_DELAY_MS,
            toast_duration_ms: constants::DEFAULT_TOAST_DURATION_MS,
        }
    }
}

impl AppConfig {
    /// Load `config.toml` from `config_dir`, or defaults if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = config_dir.join(constants::CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Config`] on malformed TOML or unknown keys.
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        // A zero tick rate would spin the event thread
        config.tick_rate_ms = config.tick_rate_ms.max(1);
        Ok(config)
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(
        mut self,
        tick_rate_ms: Option<u64>,
        connect_delay_ms: Option<u64>,
    ) -> Self {
        if let Some(tick) = tick_rate_ms {
            self.tick_rate_ms = tick.max(1);
        }
        if let Some(delay) = connect_delay_ms {
            self.connect_delay_ms = delay;
        }
        self
    }

    /// Connect delay as a [`Duration`].
    #[must_use]
    pub const fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }

    /// Toast lifetime as a [`Duration`].
    #[must_use]
    pub const fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

/// Where configuration is read from, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config-dir` flag or environment variable.
    Explicit,
    /// Platform default (`~/.config/halcyon` on Linux).
    Platform,
    /// No platform config dir available; working directory used.
    Fallback,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Explicit => write!(f, "explicit"),
            ConfigSource::Platform => write!(f, "platform default"),
            ConfigSource::Fallback => write!(f, "working directory"),
        }
    }
}

/// Resolve the configuration directory.
#[must_use]
pub fn resolve_config_dir(explicit: Option<&Path>) -> (PathBuf, ConfigSource) {
    if let Some(dir) = explicit {
        return (dir.to_path_buf(), ConfigSource::Explicit);
    }
    match dirs::config_dir() {
        Some(base) => (base.join(constants::CONFIG_DIR_NAME), ConfigSource::Platform),
        None => (PathBuf::from("."), ConfigSource::Fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("halcyon-test-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.tick_rate_ms, 250);
        assert_eq!(config.connect_delay(), Duration::from_secs(2));
        assert_eq!(config.toast_duration(), Duration::from_secs(3));
    }

    #[test]
    fn test_parse_partial() {
        let config = AppConfig::parse("connect_delay_ms = 500\n").unwrap();
        assert_eq!(config.connect_delay_ms, 500);
        assert_eq!(config.tick_rate_ms, constants::DEFAULT_TICK_RATE_MS);
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(matches!(
            AppConfig::parse("protocol = \"WireGuard\"\n"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = scratch_dir("missing");
        assert_eq!(AppConfig::load(&dir).unwrap(), AppConfig::default());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_from_file() {
        let dir = scratch_dir("load");
        std::fs::write(
            dir.join(constants::CONFIG_FILE_NAME),
            "tick_rate_ms = 100\ntoast_duration_ms = 1000\n",
        )
        .unwrap();

        let config = AppConfig::load(&dir).unwrap();
        assert_eq!(config.tick_rate_ms, 100);
        assert_eq!(config.toast_duration_ms, 1000);
        assert_eq!(config.connect_delay_ms, constants::DEFAULT_CONNECT_DELAY_MS);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = scratch_dir("bad");
        std::fs::write(dir.join(constants::CONFIG_FILE_NAME), "tick_rate_ms = [").unwrap();
        assert!(AppConfig::load(&dir).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_zero_tick_rate_in_file_is_clamped() {
        let config = AppConfig::parse("tick_rate_ms = 0\n").unwrap();
        assert_eq!(config.tick_rate_ms, 1);

        let dir = scratch_dir("zero-tick");
        std::fs::write(dir.join(constants::CONFIG_FILE_NAME), "tick_rate_ms = 0\n").unwrap();
        assert_eq!(AppConfig::load(&dir).unwrap().tick_rate_ms, 1);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default().with_overrides(Some(0), Some(0));
        assert_eq!(config.tick_rate_ms, 1);
        assert_eq!(config.connect_delay_ms, 0);
    }

    #[test]
    fn test_resolve_explicit() {
        let (dir, source) = resolve_config_dir(Some(Path::new("/tmp/halcyon")));
        assert_eq!(dir, PathBuf::from("/tmp/halcyon"));
        assert_eq!(source, ConfigSource::Explicit);
    }
}
