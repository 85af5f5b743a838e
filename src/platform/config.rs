// RazerBattery - platform/config.rs
//
// Platform directory resolution and config.toml loading with validation.
//
// Uses the `directories` crate: `ProjectDirs` for our own config directory,
// `BaseDirs::data_local_dir()` for the vendor's base directory
// (%LOCALAPPDATA% on Windows).

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved platform paths.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/razerbattery/ or
    /// %APPDATA%\RazerBattery\config\)
    pub config_dir: PathBuf,

    /// Local application-data directory the vendor log path hangs off.
    /// `None` when the platform has no such directory.
    pub data_local_dir: Option<PathBuf>,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory for config if platform dirs
    /// cannot be determined.
    pub fn resolve() -> Self {
        let config_dir = match ProjectDirs::from("", "", constants::APP_ID) {
            Some(proj_dirs) => proj_dirs.config_dir().to_path_buf(),
            None => {
                tracing::warn!("Could not determine config directory, using current directory");
                PathBuf::from(".")
            }
        };
        let data_local_dir = BaseDirs::new().map(|dirs| dirs.data_local_dir().to_path_buf());

        tracing::debug!(
            config = %config_dir.display(),
            data_local = ?data_local_dir,
            "Platform paths resolved"
        );

        Self {
            config_dir,
            data_local_dir,
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are ignored so a newer config file still loads.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[source]` section.
    pub source: SourceSection,
    /// `[monitor]` section.
    pub monitor: MonitorSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[source]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SourceSection {
    /// Base directory to resolve the vendor log path under, instead of the
    /// platform local application-data directory.
    pub data_dir: Option<String>,
}

/// `[monitor]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct MonitorSection {
    /// Seconds between status checks in watch mode.
    pub interval_seconds: Option<u64>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Override of the vendor base directory.
    pub data_dir: Option<PathBuf>,
    /// Seconds between status checks.
    pub poll_interval_secs: u64,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            poll_interval_secs: constants::DEFAULT_POLL_INTERVAL_SECS,
            log_level: None,
        }
    }
}

impl AppConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Check a poll interval against the allowed range.
pub fn validate_poll_interval(secs: u64) -> Result<u64, String> {
    if (constants::MIN_POLL_INTERVAL_SECS..=constants::MAX_POLL_INTERVAL_SECS).contains(&secs) {
        Ok(secs)
    } else {
        Err(format!(
            "interval {secs}s is out of range ({}-{})",
            constants::MIN_POLL_INTERVAL_SECS,
            constants::MAX_POLL_INTERVAL_SECS,
        ))
    }
}

/// Read and parse a config file.
///
/// `Ok(None)` when the file does not exist.
pub fn read_raw_config(path: &Path) -> Result<Option<RawConfig>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    toml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Validate every field, accumulating warnings for rejected values.
pub fn validate_config(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings = Vec::new();

    // -- Source: data_dir --
    if let Some(dir) = raw.source.data_dir {
        if dir.trim().is_empty() {
            warnings.push("[source] data_dir is empty. Using the platform default.".to_string());
        } else {
            config.data_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Monitor: interval_seconds --
    if let Some(secs) = raw.monitor.interval_seconds {
        match validate_poll_interval(secs) {
            Ok(secs) => config.poll_interval_secs = secs,
            Err(msg) => warnings.push(format!(
                "[monitor] {msg}. Using default ({}).",
                constants::DEFAULT_POLL_INTERVAL_SECS
            )),
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL
            ));
        }
    }

    (config, warnings)
}

/// Load and validate a config file, never failing.
///
/// A missing file yields defaults with no warnings (first run). An
/// unreadable or unparseable file yields defaults plus a warning.
pub fn load_config(path: &Path) -> (AppConfig, Vec<String>) {
    match read_raw_config(path) {
        Ok(Some(raw)) => validate_config(raw),
        Ok(None) => (AppConfig::default(), Vec::new()),
        Err(e) => (AppConfig::default(), vec![format!("{e}. Using defaults.")]),
    }
}
