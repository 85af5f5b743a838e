// RazerBattery - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Razer Battery Display";

/// Application identifier used for config directories.
pub const APP_ID: &str = "RazerBattery";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Vendor log location
// =============================================================================

/// Path components of the vendor log directory, relative to the local
/// application-data directory (`%LOCALAPPDATA%` on Windows).
pub const VENDOR_LOG_DIR_COMPONENTS: &[&str] = &["Razer", "RazerAppEngine", "User Data", "Logs"];

/// Rotation family file name pattern: base name, optional ASCII rotation
/// digits, fixed extension. Nothing else may vary.
pub const ROTATION_FILE_PATTERN: &str = r"^background-manager([0-9]+)?\.log$";

// =============================================================================
// Payload format
// =============================================================================

/// Line terminators: CRLF, lone CR, LF.
pub const LINE_BREAK_PATTERN: &str = r"\r\n|\r|\n";

/// First brace through last brace on a line (greedy).
pub const PAYLOAD_PATTERN: &str = r"\{.*\}";

/// Outer record key holding the string-encoded inner document.
pub const FIELD_NEW_VALUE: &str = "newValue";

/// Inner document key identifying the device.
pub const FIELD_PRODUCT_ID: &str = "productId";

/// Inner document object holding localised product names.
pub const FIELD_PRODUCT_NAME: &str = "productName";

/// Locale key used inside `productName`.
pub const FIELD_PRODUCT_NAME_LOCALE: &str = "en";

/// Inner document object holding power information.
pub const FIELD_POWER_STATUS: &str = "powerStatus";

/// Charging state key inside `powerStatus`.
pub const FIELD_CHARGING_STATUS: &str = "chargingStatus";

/// Battery percentage key inside `powerStatus`.
pub const FIELD_LEVEL: &str = "level";

/// Highest valid battery percentage.
pub const MAX_BATTERY_LEVEL: u8 = 100;

// =============================================================================
// Monitor
// =============================================================================

/// Default interval between status checks (seconds).
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Minimum user-configurable poll interval (seconds).
pub const MIN_POLL_INTERVAL_SECS: u64 = 1;

/// Maximum user-configurable poll interval (seconds).
pub const MAX_POLL_INTERVAL_SECS: u64 = 3_600;

/// How often the cancel flag is checked within each poll sleep (ms).
pub const MONITOR_CANCEL_CHECK_INTERVAL_MS: u64 = 100;

// =============================================================================
// Display
// =============================================================================

/// Maximum length (chars) of a tray tooltip title.
pub const MAX_TITLE_CHARS: usize = 128;

/// Glyph shown when the status check failed.
pub const ERROR_GLYPH: &str = "!";

/// Glyph shown before the first status check completes.
pub const PENDING_GLYPH: &str = "...";

/// Lower bounds (inclusive) of the coloured level bands.
pub const BAND_GREEN_MIN: u8 = 80;
pub const BAND_LIME_MIN: u8 = 60;
pub const BAND_LIGHT_ORANGE_MIN: u8 = 40;
pub const BAND_ORANGE_MIN: u8 = 20;

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Results go to stdout, so diagnostics stay quiet
/// unless asked for.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Maximum length of a log line included in trace output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
