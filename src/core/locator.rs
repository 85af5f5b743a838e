// RazerBattery - core/locator.rs
//
// Finds the vendor log directory and picks the newest file of the
// `background-manager` rotation family inside it.
//
// Only directory *metadata* is read here, never file contents. The listing is
// non-recursive: rotated files always sit directly in the log directory.
//
// Rotation index: the digits between the base name and the extension, or 0
// for the un-suffixed file. The highest index wins. When two names parse to
// the same index (`background-manager.log` vs `background-manager0.log`, or
// `background-manager7.log` vs `background-manager007.log`) the
// lexicographically smallest name wins, so the choice never depends on the
// order the OS lists entries in.

use crate::util::constants;
use crate::util::error::StatusError;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// A file of the rotation family together with its parsed index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogCandidate {
    /// Bare file name, e.g. `background-manager7.log`.
    pub file_name: String,

    /// Rotation index (0 for the un-suffixed file).
    pub index: u64,
}

fn rotation_regex() -> &'static Regex {
    static ROTATION: OnceLock<Regex> = OnceLock::new();
    ROTATION.get_or_init(|| {
        Regex::new(constants::ROTATION_FILE_PATTERN).expect("rotation_regex: invalid regex")
    })
}

/// The vendor log directory under a local application-data directory.
pub fn log_directory(base_dir: &Path) -> PathBuf {
    constants::VENDOR_LOG_DIR_COMPONENTS
        .iter()
        .fold(base_dir.to_path_buf(), |dir, component| dir.join(component))
}

/// Rotation index of `file_name`, or `None` if the name is not part of the
/// rotation family.
///
/// Digit runs too long for a `u64` are rejected rather than saturated.
pub fn rotation_index(file_name: &str) -> Option<u64> {
    let caps = rotation_regex().captures(file_name)?;
    match caps.get(1) {
        None => Some(0),
        Some(digits) => match digits.as_str().parse::<u64>() {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::debug!(
                    file = file_name,
                    error = %e,
                    "Rotation suffix does not fit in u64, ignoring file"
                );
                None
            }
        },
    }
}

/// Pick the newest candidate: highest index, smallest name on ties.
pub fn select_latest<I>(candidates: I) -> Option<LogCandidate>
where
    I: IntoIterator<Item = LogCandidate>,
{
    candidates.into_iter().max_by(|a, b| {
        a.index
            .cmp(&b.index)
            .then_with(|| b.file_name.cmp(&a.file_name))
    })
}

/// Locate the newest rotated log file under `base_dir`.
///
/// # Errors
/// - `NoLogDirectory` if the log directory is missing, is not a directory,
///   or cannot be listed.
/// - `NoLogFile` if no entry of the directory belongs to the rotation family.
pub fn locate_latest_log(base_dir: &Path) -> Result<PathBuf, StatusError> {
    let log_dir = log_directory(base_dir);

    // `fs::metadata` rather than `Path::is_dir` so the reason for a miss
    // reaches the debug log.
    match std::fs::metadata(&log_dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            tracing::debug!(dir = %log_dir.display(), "Log path is not a directory");
            return Err(StatusError::NoLogDirectory);
        }
        Err(e) => {
            tracing::debug!(dir = %log_dir.display(), error = %e, "Log directory unavailable");
            return Err(StatusError::NoLogDirectory);
        }
    }

    let walker = walkdir::WalkDir::new(&log_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);

    let mut candidates = Vec::new();
    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                tracing::warn!(dir = %log_dir.display(), error = %e, "Cannot list log directory");
                return Err(StatusError::NoLogDirectory);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Skipping inaccessible log directory entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };

        if let Some(index) = rotation_index(file_name) {
            tracing::trace!(file = file_name, index, "Rotation candidate");
            candidates.push(LogCandidate {
                file_name: file_name.to_string(),
                index,
            });
        }
    }

    let found = candidates.len();
    let latest = select_latest(candidates).ok_or_else(|| {
        tracing::debug!(dir = %log_dir.display(), "No rotation candidates found");
        StatusError::NoLogFile
    })?;

    tracing::debug!(
        dir = %log_dir.display(),
        candidates = found,
        selected = %latest.file_name,
        index = latest.index,
        "Latest log file selected"
    );

    Ok(log_dir.join(latest.file_name))
}

// =============================================================================
// Tests
// =============================================================================
