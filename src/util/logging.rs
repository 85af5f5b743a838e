// RazerBattery - util/logging.rs
//
// Diagnostic logging for the status checker.
//
// Activation, highest priority first:
//   - RUST_LOG (full EnvFilter directive syntax)
//   - --debug on the command line
//   - [logging] level in config.toml
//   - DEFAULT_LOG_LEVEL
//
// Output goes to stderr; stdout carries the status output.

use super::constants;
use tracing_subscriber::EnvFilter;

/// Filter directive chosen by the activation priority.
///
/// An empty or whitespace-only `RUST_LOG` counts as unset.
pub fn filter_directive(
    rust_log: Option<&str>,
    debug_flag: bool,
    config_level: Option<&str>,
) -> String {
    match rust_log.map(str::trim).filter(|v| !v.is_empty()) {
        Some(env) => env.to_string(),
        None if debug_flag => "debug".to_string(),
        None => config_level
            .unwrap_or(constants::DEFAULT_LOG_LEVEL)
            .to_lowercase(),
    }
}

/// Install the global subscriber.
///
/// A malformed `RUST_LOG` falls back to the default level. Calling this
/// a second time keeps the subscriber already installed.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(rust_log.as_deref(), debug_flag, config_level);

    let (filter, rejected) = match EnvFilter::try_new(&directive) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(constants::DEFAULT_LOG_LEVEL), Some(e)),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .compact()
        .try_init()
        .is_ok();

    if let Some(e) = rejected {
        tracing::warn!(directive = %directive, error = %e, "Invalid log filter, using default");
    }
    tracing::debug!(
        app = constants::APP_NAME,
        version = constants::APP_VERSION,
        directive = %directive,
        installed,
        "Logging initialised"
    );
}
