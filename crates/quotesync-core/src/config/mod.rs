//! Runtime settings.
//!
//! Settings live in a JSON file; every field is optional there and falls
//! back to its default. Environment variables override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{has_http_scheme, non_blank};

pub const DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_REMOTE_CATEGORY: &str = "Server";
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 10;

pub const ENV_REMOTE_URL: &str = "QUOTESYNC_REMOTE_URL";
pub const ENV_DATA_DIR: &str = "QUOTESYNC_DATA_DIR";
pub const ENV_SYNC_INTERVAL_SECS: &str = "QUOTESYNC_SYNC_INTERVAL_SECS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Snapshot endpoint; `None` disables remote sync
    pub remote_url: Option<String>,
    /// Category assigned to every remote quote
    pub remote_category: String,
    pub sync_interval_secs: u64,
    pub fetch_timeout_secs: u64,
    /// Maximum number of remote items taken per snapshot
    pub snapshot_limit: Option<usize>,
    /// Start from the built-in quotes when nothing is persisted
    pub seed_defaults: bool,
    /// Push newly added quotes to the remote
    pub push_on_add: bool,
    /// Directory holding the persisted quote slot
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            remote_url: Some(DEFAULT_REMOTE_URL.to_string()),
            remote_category: DEFAULT_REMOTE_CATEGORY.to_string(),
            sync_interval_secs: DEFAULT_SYNC_INTERVAL_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            snapshot_limit: Some(DEFAULT_SNAPSHOT_LIMIT),
            seed_defaults: true,
            push_on_add: false,
            data_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`, using defaults when the file does not exist
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            Error::Config(format!("Failed to read config at {}: {error}", path.display()))
        })?;
        let settings = serde_json::from_str::<Self>(&raw).map_err(|error| {
            Error::Config(format!("Failed to parse config at {}: {error}", path.display()))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                Error::Config(format!(
                    "Failed to create config directory {}: {error}",
                    parent.display()
                ))
            })?;
        }

        let serialized = serde_json::to_string_pretty(self)
            .map_err(|error| Error::Config(format!("Failed to serialize config: {error}")))?;
        std::fs::write(path, serialized).map_err(|error| {
            Error::Config(format!("Failed to write config at {}: {error}", path.display()))
        })
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// An empty `QUOTESYNC_REMOTE_URL` disables the remote.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_REMOTE_URL) {
            self.remote_url = non_blank(Some(url));
        }
        if let Some(dir) = non_blank(lookup(ENV_DATA_DIR)) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = non_blank(lookup(ENV_SYNC_INTERVAL_SECS)) {
            self.sync_interval_secs = raw.parse().map_err(|_| {
                Error::Config(format!(
                    "{ENV_SYNC_INTERVAL_SECS} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
        }
        self.validate()
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(url) = self.remote_url() {
            if !has_http_scheme(&url) {
                return Err(Error::Config(
                    "remote_url must include http:// or https://".to_string(),
                ));
            }
        }
        if self.sync_interval_secs == 0 {
            return Err(Error::Config(
                "sync_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(Error::Config(
                "fetch_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Normalized remote URL, `None` when unset or blank
    pub fn remote_url(&self) -> Option<String> {
        non_blank(self.remote_url.clone())
    }

    pub const fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs)
    }

    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Configured data directory, or `fallback` when unset
    pub fn data_dir_or(&self, fallback: impl FnOnce() -> PathBuf) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect::<HashMap<_, _>>();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_from_path(&dir.path().join("config.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.sync_interval(), Duration::from_secs(30));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"remote_category": "Remote", "seed_defaults": false}"#).unwrap();

        let settings = Settings::load_from_path(&path).unwrap();
        assert_eq!(settings.remote_category, "Remote");
        assert!(!settings.seed_defaults);
        assert_eq!(settings.remote_url.as_deref(), Some(DEFAULT_REMOTE_URL));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"remote": "x"}"#).unwrap();

        let error = Settings::load_from_path(&path).unwrap_err();
        assert!(error.to_string().contains("unknown field"));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let settings = Settings {
            push_on_add: true,
            snapshot_limit: None,
            ..Settings::default()
        };

        settings.save_to_path(&path).unwrap();
        assert_eq!(Settings::load_from_path(&path).unwrap(), settings);
    }

    #[test]
    fn env_overrides_take_precedence() {
        let mut settings = Settings::default();
        settings
            .apply_overrides(env(&[
                (ENV_REMOTE_URL, "http://localhost:8080/quotes"),
                (ENV_DATA_DIR, "/tmp/quotes"),
                (ENV_SYNC_INTERVAL_SECS, "5"),
            ]))
            .unwrap();

        assert_eq!(
            settings.remote_url().as_deref(),
            Some("http://localhost:8080/quotes")
        );
        assert_eq!(settings.data_dir, Some(PathBuf::from("/tmp/quotes")));
        assert_eq!(settings.sync_interval(), Duration::from_secs(5));
    }

    #[test]
    fn empty_remote_override_disables_remote() {
        let mut settings = Settings::default();
        settings.apply_overrides(env(&[(ENV_REMOTE_URL, " ")])).unwrap();
        assert_eq!(settings.remote_url(), None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut settings = Settings::default();
        assert!(settings
            .apply_overrides(env(&[(ENV_SYNC_INTERVAL_SECS, "soon")]))
            .is_err());

        let bad_url = Settings {
            remote_url: Some("ftp://example.com".to_string()),
            ..Settings::default()
        };
        assert!(bad_url.validate().is_err());

        let zero_interval = Settings {
            sync_interval_secs: 0,
            ..Settings::default()
        };
        assert!(zero_interval.validate().is_err());
    }
}
