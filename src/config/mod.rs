// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use showcase::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Resolve settings.toml inside an explicit directory
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! let path = config::default_path(Some(temp_dir.clone()));
//!
//! // Missing file yields defaults
//! let mut config = config::load_or_default(path.as_deref()).unwrap_or_default();
//!
//! // Modify a setting and save it
//! config.language = Some("pt-BR".to_string());
//! let path = path.expect("config path");
//! config::save_to_path(&config, &path).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&path).expect("Failed to load from path");
//! assert_eq!(loaded_config.language, Some("pt-BR".to_string()));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

use crate::app::paths;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use defaults::{
    DEFAULT_LOGIN_DELAY_MS, DEFAULT_LOGOUT_DELAY_MS, DEFAULT_QUERY_CACHE_CAPACITY,
    DEFAULT_QUERY_GC_TIME_SECS,
};

const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub login_delay_ms: Option<u64>,
    #[serde(default)]
    pub logout_delay_ms: Option<u64>,
    #[serde(default)]
    pub query_cache_capacity: Option<usize>,
    #[serde(default)]
    pub query_gc_time_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            login_delay_ms: Some(DEFAULT_LOGIN_DELAY_MS),
            logout_delay_ms: Some(DEFAULT_LOGOUT_DELAY_MS),
            query_cache_capacity: Some(DEFAULT_QUERY_CACHE_CAPACITY),
            query_gc_time_secs: Some(DEFAULT_QUERY_GC_TIME_SECS),
        }
    }
}

impl Config {
    /// Simulated login latency, clamped to the supported range.
    #[must_use]
    pub fn login_delay(&self) -> Duration {
        clamp_delay(self.login_delay_ms.unwrap_or(DEFAULT_LOGIN_DELAY_MS))
    }

    /// Simulated logout latency, clamped to the supported range.
    #[must_use]
    pub fn logout_delay(&self) -> Duration {
        clamp_delay(self.logout_delay_ms.unwrap_or(DEFAULT_LOGOUT_DELAY_MS))
    }

    #[must_use]
    pub fn query_cache_capacity(&self) -> usize {
        self.query_cache_capacity
            .unwrap_or(DEFAULT_QUERY_CACHE_CAPACITY)
            .clamp(
                defaults::MIN_QUERY_CACHE_CAPACITY,
                defaults::MAX_QUERY_CACHE_CAPACITY,
            )
    }

    #[must_use]
    pub fn query_gc_time(&self) -> Duration {
        Duration::from_secs(self.query_gc_time_secs.unwrap_or(DEFAULT_QUERY_GC_TIME_SECS))
    }
}

fn clamp_delay(ms: u64) -> Duration {
    Duration::from_millis(ms.min(defaults::MAX_SIMULATED_DELAY_MS))
}

/// Returns the settings file inside `base_dir`, or inside the resolved
/// config directory when no base is given.
#[must_use]
pub fn default_path(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads `path` when it exists, defaults otherwise.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) if path.exists() => load_from_path(path),
        _ => Ok(Config::default()),
    }
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
