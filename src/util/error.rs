// RazerBattery - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
//
// `StatusError` is the closed taxonomy surfaced by the status read path;
// every lower-level failure inside that path collapses into one of its three
// variants. The remaining types cover the ambient concerns around it
// (configuration, output) and keep their causal chain for diagnostics.

use std::fmt;
use std::io;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Status errors
// ---------------------------------------------------------------------------

/// Why no battery status could be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusError {
    /// The vendor log directory does not exist (vendor app never ran, or
    /// it logs somewhere else).
    NoLogDirectory,

    /// The directory exists but holds no file of the rotation family, or
    /// the selected file could not be read.
    NoLogFile,

    /// A log file was read but yielded no usable device record.
    ParseFailure,
}

impl StatusError {
    /// Variant name, used as status text by front ends.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoLogDirectory => "NoLogDirectory",
            Self::NoLogFile => "NoLogFile",
            Self::ParseFailure => "ParseFailure",
        }
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLogDirectory => write!(f, "Could not find the Razer log directory"),
            Self::NoLogFile => write!(f, "Could not find a background-manager log file"),
            Self::ParseFailure => {
                write!(f, "No battery status found in the latest log file")
            }
        }
    }
}

impl std::error::Error for StatusError {}

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Errors that end a front-end run, categorised by subsystem.
#[derive(Debug)]
pub enum RazerBatteryError {
    /// Configuration loading failed.
    Config(ConfigError),

    /// Writing status output failed.
    Export(ExportError),
}

impl fmt::Display for RazerBatteryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Export(e) => write!(f, "Output error: {e}"),
        }
    }
}

impl std::error::Error for RazerBatteryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors writing status output.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error on the output stream.
    Io { target: String, source: io::Error },

    /// CSV serialisation error.
    Csv { target: String, source: csv::Error },

    /// JSON serialisation error.
    Json {
        target: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { target, source } => write!(f, "I/O error writing {target}: {source}"),
            Self::Csv { target, source } => write!(f, "CSV error writing {target}: {source}"),
            Self::Json { target, source } => {
                write!(f, "JSON error writing {target}: {source}")
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for RazerBatteryError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    NotFound { path: PathBuf },

    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "Config file '{}' does not exist", path.display())
            }
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<ConfigError> for RazerBatteryError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
