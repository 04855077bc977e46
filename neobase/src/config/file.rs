//! Configuration file handling for ~/.neobase/config.ini.
//!
//! ```ini
//! [data]
//! date = 2012-01-01
//! duplicates = keep-first
//! por_file = ~/data/optd_por_public.csv
//! ```
//!
//! Every key is optional. A missing file yields defaults.

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use super::NeoBaseConfig;
use crate::loader::{DuplicatePolicy, ReferenceDate};

const DATA_SECTION: &str = "data";

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// `[data]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSettings {
    pub date: Option<ReferenceDate>,
    pub duplicates: Option<DuplicatePolicy>,
    pub por_file: Option<PathBuf>,
}

/// Contents of the user configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub data: DataSettings,
}

impl ConfigFile {
    /// Load configuration from the default path (~/.neobase/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        Self::from_ini(&ini)
    }

    /// Parse configuration from INI text.
    pub fn parse(content: &str) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_str(content).map_err(ini::Error::Parse)?;
        Self::from_ini(&ini)
    }

    /// Get the path to the config file (~/.neobase/config.ini).
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".neobase")
            .join("config.ini")
    }

    /// Overlay the file settings on a configuration.
    pub fn apply(&self, mut config: NeoBaseConfig) -> NeoBaseConfig {
        if let Some(date) = &self.data.date {
            config = config.with_date(date.clone());
        }
        if let Some(duplicates) = self.data.duplicates {
            config = config.with_duplicates(duplicates);
        }
        if let Some(path) = &self.data.por_file {
            config = config.with_por_file(path.clone());
        }
        config
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigFileError> {
        let mut config = Self::default();

        let Some(section) = ini.section(Some(DATA_SECTION)) else {
            return Ok(config);
        };

        if let Some(v) = section.get("date") {
            let v = v.trim();
            if !v.is_empty() {
                config.data.date = Some(ReferenceDate::parse(v).map_err(|_| {
                    invalid_value("date", v, "expected a date like '2012-01-01'")
                })?);
            }
        }
        if let Some(v) = section.get("duplicates") {
            config.data.duplicates = Some(v.parse().map_err(|_| {
                invalid_value("duplicates", v, "must be one of: keep-all, keep-first, 1, 0")
            })?);
        }
        if let Some(v) = section.get("por_file") {
            let v = v.trim();
            if !v.is_empty() {
                config.data.por_file = Some(expand_tilde(v));
            }
        }

        Ok(config)
    }
}

fn invalid_value(key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: DATA_SECTION.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
