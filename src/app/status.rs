// RazerBattery - app/status.rs
//
// Composed read path: locate the newest log, extract statuses, map every
// failure onto the three-way `StatusError`.
//
// Stateless: each call re-lists the directory and re-reads the whole file.

use crate::core::extractor;
use crate::core::locator;
use crate::core::model::{BatteryStatus, StatusReport};
use crate::util::error::StatusError;
use chrono::Local;
use std::path::Path;

/// Latest battery status of every device found in the newest vendor log.
///
/// `base_dir` is the local application-data directory the vendor log path
/// is resolved under.
///
/// # Errors
/// - `NoLogDirectory` / `NoLogFile` from the locator. A selected file that
///   cannot be read (e.g. rotated away mid-call) is also `NoLogFile`.
/// - `ParseFailure` when the file holds no usable record.
pub fn get_battery_statuses(base_dir: &Path) -> Result<Vec<BatteryStatus>, StatusError> {
    check_status(base_dir).map(|report| report.statuses)
}

/// Like [`get_battery_statuses`] but also reports which file was read and
/// when.
pub fn check_status(base_dir: &Path) -> Result<StatusReport, StatusError> {
    let log_file = locator::locate_latest_log(base_dir)?;

    let extraction = extractor::extract_from_file(&log_file).map_err(|e| {
        tracing::warn!(
            file = %log_file.display(),
            error = %e,
            "Selected log file could not be read"
        );
        StatusError::NoLogFile
    })?;

    if extraction.statuses.is_empty() {
        tracing::debug!(
            file = %log_file.display(),
            lines = extraction.stats.lines_scanned,
            "No battery status records in log file"
        );
        return Err(StatusError::ParseFailure);
    }

    Ok(StatusReport {
        log_file,
        checked_at: Local::now(),
        statuses: extraction.statuses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const MOUSE_LINE: &str = r#"[info] {"newValue":"{\"productId\":1,\"productName\":{\"en\":\"Mouse\"},\"powerStatus\":{\"chargingStatus\":\"NoCharge\",\"level\":55}}"}"#;

    #[test]
    fn test_missing_directory() {
        let base = tempfile::tempdir().unwrap();
        assert_eq!(
            get_battery_statuses(base.path()),
            Err(StatusError::NoLogDirectory)
        );
    }

    #[test]
    fn test_empty_directory() {
        let base = tempfile::tempdir().unwrap();
        fs::create_dir_all(locator::log_directory(base.path())).unwrap();
        assert_eq!(get_battery_statuses(base.path()), Err(StatusError::NoLogFile));
    }

    #[test]
    fn test_file_without_records() {
        let base = tempfile::tempdir().unwrap();
        let dir = locator::log_directory(base.path());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("background-manager.log"), "[info] nothing here\n").unwrap();
        assert_eq!(
            get_battery_statuses(base.path()),
            Err(StatusError::ParseFailure)
        );
    }

    #[test]
    fn test_report_carries_selected_file() {
        let base = tempfile::tempdir().unwrap();
        let dir = locator::log_directory(base.path());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("background-manager.log"), "").unwrap();
        fs::write(dir.join("background-manager4.log"), MOUSE_LINE).unwrap();

        let report = check_status(base.path()).unwrap();
        assert_eq!(report.log_file, dir.join("background-manager4.log"));
        assert_eq!(report.statuses.len(), 1);
        assert_eq!(report.statuses[0].level, Some(55));
    }
}
