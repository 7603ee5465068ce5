//! Optional TOML configuration
//!
//! Resolution:
//! 1. An explicit path (`--config`) must exist and parse
//! 2. Otherwise the default location (~/.local/share/geartrack/config.toml)
//!    is read when present
//! 3. Otherwise built-in defaults
//!
//! ```toml
//! [storage]
//! database_path = "/srv/shop/geartrack.db"
//!
//! [dashboard]
//! recent_services = 5
//!
//! [export]
//! directory = "/srv/shop/reports"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Store file used when neither `--db` nor the config names one
pub const DEFAULT_DATABASE_FILE: &str = "geartrack.db";

/// Recent service orders shown on the dashboard by default
pub const DEFAULT_RECENT_SERVICES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: Option<PathBuf>,
    pub recent_services: usize,
    /// Where report exports go when `--export` has no directory
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            recent_services: DEFAULT_RECENT_SERVICES,
            export_dir: None,
        }
    }
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("geartrack").join("config.toml"))
}

impl Config {
    /// Load from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => Some(fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?),
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => {
                    Some(fs::read_to_string(&default_path).map_err(|e| {
                        Error::Config(format!("Failed to read {}: {}", default_path.display(), e))
                    })?)
                }
                _ => None,
            },
        };

        match content {
            Some(content) => Self::parse(&content),
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse TOML content, filling unset keys with defaults
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();
        if let Some(storage) = raw.storage {
            config.database_path = storage.database_path;
        }
        if let Some(dashboard) = raw.dashboard {
            if let Some(recent) = dashboard.recent_services {
                config.recent_services = recent;
            }
        }
        if let Some(export) = raw.export {
            config.export_dir = export.directory;
        }
        Ok(config)
    }

    /// Store path from the config, or the default file in the working directory
    pub fn database_path_or_default(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    storage: Option<RawStorage>,
    dashboard: Option<RawDashboard>,
    export: Option<RawExport>,
}

#[derive(Debug, Deserialize)]
struct RawStorage {
    database_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawDashboard {
    recent_services: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawExport {
    directory: Option<PathBuf>,
}
