// RazerBattery - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading (config.toml + CLI overrides)
// 3. Logging initialisation (debug mode support)
// 4. One-shot status output, or continuous output in watch mode

use clap::Parser;
use razer_battery::app::monitor::MonitorManager;
use razer_battery::app::status;
use razer_battery::core::export::{self, OutputFormat};
use razer_battery::core::model::MonitorUpdate;
use razer_battery::platform::config::{self, AppConfig, PlatformPaths};
use razer_battery::util::error::{ConfigError, RazerBatteryError, StatusError};
use razer_battery::util::{constants, logging};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Exit code when the status check itself failed.
const EXIT_STATUS_UNAVAILABLE: u8 = 2;

/// Razer Battery Display - battery levels of wireless Razer peripherals.
///
/// Reads the newest background-manager log written by Razer Synapse and
/// prints the lowest battery level followed by one line per device.
#[derive(Parser, Debug)]
#[command(name = "razer-battery", version, about)]
struct Cli {
    /// Local application-data directory holding Razer/RazerAppEngine
    /// (defaults to the platform one, e.g. %LOCALAPPDATA%).
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Keep polling and print every update.
    #[arg(short = 'w', long = "watch")]
    watch: bool,

    /// Seconds between checks in watch mode (overrides config).
    #[arg(short = 'i', long = "interval", value_parser = parse_interval)]
    interval: Option<u64>,

    /// Stop watch mode after this many updates.
    #[arg(short = 'n', long = "count", requires = "watch")]
    count: Option<usize>,

    /// Config file to use instead of the platform default.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn parse_interval(s: &str) -> Result<u64, String> {
    let secs: u64 = s.parse().map_err(|e| format!("invalid number '{s}': {e}"))?;
    config::validate_poll_interval(secs)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let platform_paths = PlatformPaths::resolve();

    let (app_config, config_warnings) = match load_app_config(&cli, &platform_paths) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        watch = cli.watch,
        "Razer battery display starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    // Base directory: CLI override > config > platform default.
    let base_dir = cli
        .data_dir
        .clone()
        .or_else(|| app_config.data_dir.clone())
        .or_else(|| platform_paths.data_local_dir.clone());

    let result = match base_dir {
        Some(base_dir) if cli.watch => run_watch(&cli, &app_config, base_dir),
        Some(base_dir) => run_once(&cli, base_dir),
        None => {
            tracing::warn!("No local application-data directory on this platform");
            export::write_outcome(
                &Err(StatusError::NoLogDirectory),
                cli.format,
                std::io::stdout().lock(),
            )
            .map(|_| ExitCode::from(EXIT_STATUS_UNAVAILABLE))
            .map_err(RazerBatteryError::from)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Load config.toml. An explicitly named file must exist and parse; the
/// platform default is optional and only ever produces warnings.
fn load_app_config(
    cli: &Cli,
    paths: &PlatformPaths,
) -> Result<(AppConfig, Vec<String>), ConfigError> {
    match &cli.config {
        Some(path) => match config::read_raw_config(path)? {
            Some(raw) => Ok(config::validate_config(raw)),
            None => Err(ConfigError::NotFound { path: path.clone() }),
        },
        None => Ok(config::load_config(&paths.config_file())),
    }
}

fn run_once(cli: &Cli, base_dir: PathBuf) -> Result<ExitCode, RazerBatteryError> {
    let outcome = status::check_status(&base_dir);
    export::write_outcome(&outcome, cli.format, std::io::stdout().lock())?;

    Ok(match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::from(EXIT_STATUS_UNAVAILABLE),
    })
}

fn run_watch(
    cli: &Cli,
    app_config: &AppConfig,
    base_dir: PathBuf,
) -> Result<ExitCode, RazerBatteryError> {
    let interval = cli
        .interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| app_config.poll_interval());

    let mut manager = MonitorManager::new();
    manager.start(base_dir, interval);

    // A check is one bounded file scan, so an update is always due within
    // one interval plus scan time.
    let timeout = interval + Duration::from_secs(60);
    let mut delivered = 0usize;

    while let Some(update) = manager.wait_update(timeout) {
        match update {
            MonitorUpdate::Status(outcome) => {
                export::write_outcome(&outcome, cli.format, std::io::stdout().lock())?;
                delivered += 1;
                if cli.count.is_some_and(|n| delivered >= n) {
                    manager.stop();
                }
            }
            MonitorUpdate::Stopped => break,
        }
    }

    tracing::info!(updates = delivered, "Watch finished");
    Ok(ExitCode::SUCCESS)
}
