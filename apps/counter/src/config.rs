//! # Counter Configuration
//!
//! Configuration loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. TOML Config File (highest priority)                                 │
//! │     ~/.config/dispensary-counter/counter.toml (Linux)                   │
//! │     ~/Library/Application Support/com.dispensary.counter/counter.toml   │
//! │                                                                         │
//! │  2. Default Values                                                      │
//! │     Asia/Manila clock, data-dir database, downloads-dir mirror file     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Environment variables are not consulted.
//!
//! ## Configuration File Format
//! ```toml
//! # counter.toml
//! [clinic]
//! name = "Cabiao Senior High School"
//!
//! [storage]
//! database_path = "/srv/clinic/dispensary.db"
//!
//! [mirror]
//! path = "/home/nurse/Downloads/medicine_log.txt"
//!
//! [clock]
//! zone = "Asia/Manila"
//! utc_offset = "+08:00"
//! ```

use chrono::FixedOffset;
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use dispensary_core::clock::DEFAULT_ZONE_NAME;
use dispensary_core::CivilClock;

/// Clinic name shown in the banner when none is configured.
pub const DEFAULT_CLINIC_NAME: &str = "Cabiao Senior High School";

/// Offset of the default civil zone.
pub const DEFAULT_UTC_OFFSET: &str = "+08:00";

const DATABASE_FILE_NAME: &str = "dispensary.db";
const MIRROR_FILE_NAME: &str = "medicine_log.txt";
const CONFIG_FILE_NAME: &str = "counter.toml";

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema.
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is present but unusable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No home directory to derive default paths from.
    #[error("Could not determine app data directory")]
    NoDataDirectory,
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[clinic]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicConfig {
    /// Shown in the banner above the menu.
    #[serde(default = "default_clinic_name")]
    pub name: String,
}

fn default_clinic_name() -> String {
    DEFAULT_CLINIC_NAME.to_string()
}

impl Default for ClinicConfig {
    fn default() -> Self {
        ClinicConfig {
            name: default_clinic_name(),
        }
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file. Default: `dispensary.db` in the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

/// `[mirror]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Text copy of the log. Default: `medicine_log.txt` in the downloads folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// `[clock]` section.
///
/// The zone name is informational; the offset is what converts "now".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    #[serde(default = "default_zone")]
    pub zone: String,

    /// `+HH:MM` or `-HH:MM`.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

fn default_zone() -> String {
    DEFAULT_ZONE_NAME.to_string()
}

fn default_utc_offset() -> String {
    DEFAULT_UTC_OFFSET.to_string()
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig {
            zone: default_zone(),
            utc_offset: default_utc_offset(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete counter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub clinic: ClinicConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub mirror: MirrorConfig,

    #[serde(default)]
    pub clock: ClockConfig,
}

impl AppConfig {
    /// Loads configuration from file.
    ///
    /// ## Loading Order
    /// 1. Start with defaults
    /// 2. Load from TOML file (if exists)
    /// 3. Validate
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading counter config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Loads configuration, falling back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            Self::default()
        })
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.clinic.name.trim().is_empty() {
            return Err(ConfigError::Invalid("clinic.name must not be empty".into()));
        }

        if self.clock.zone.trim().is_empty() {
            return Err(ConfigError::Invalid("clock.zone must not be empty".into()));
        }

        self.utc_offset()?;
        Ok(())
    }

    /// Parsed `[clock] utc_offset`.
    pub fn utc_offset(&self) -> ConfigResult<FixedOffset> {
        parse_utc_offset(&self.clock.utc_offset).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "clock.utc_offset must look like +08:00, got: '{}'",
                self.clock.utc_offset
            ))
        })
    }

    /// Clock for the configured civil zone.
    pub fn clock(&self) -> ConfigResult<CivilClock> {
        Ok(CivilClock::new(self.clock.zone.clone(), self.utc_offset()?))
    }

    /// Database file, explicit or in the platform data directory.
    ///
    /// ## Platform-Specific Defaults
    /// - **macOS**: `~/Library/Application Support/com.dispensary.counter/dispensary.db`
    /// - **Windows**: `%APPDATA%\dispensary\counter\data\dispensary.db`
    /// - **Linux**: `~/.local/share/dispensary-counter/dispensary.db`
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        let dirs = Self::project_dirs().ok_or(ConfigError::NoDataDirectory)?;
        Ok(dirs.data_dir().join(DATABASE_FILE_NAME))
    }

    /// Mirror file, explicit or in the downloads folder.
    ///
    /// Falls back to the data directory on systems without a downloads folder.
    pub fn mirror_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.mirror.path {
            return Ok(path.clone());
        }

        if let Some(downloads) = UserDirs::new().and_then(|u| u.download_dir().map(PathBuf::from))
        {
            return Ok(downloads.join(MIRROR_FILE_NAME));
        }

        let dirs = Self::project_dirs().ok_or(ConfigError::NoDataDirectory)?;
        Ok(dirs.data_dir().join(MIRROR_FILE_NAME))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "dispensary", "counter")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

/// Parses `+HH:MM` / `-HH:MM` into a fixed offset.
fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let value = value.trim();
    let (sign, rest) = match value.as_bytes().first()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => return None,
    };

    let (hours, minutes) = rest.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
