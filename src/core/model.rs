// RazerBattery - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers.

use crate::util::error::StatusError;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

// =============================================================================
// Battery status (normalised output of extraction)
// =============================================================================

/// Latest known battery state of one peripheral.
///
/// The device identifier that was used to deduplicate records is not part of
/// this value; it only exists inside a single extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatteryStatus {
    /// Human-readable product name (English locale).
    pub device_name: String,

    /// Vendor-defined charging state, e.g. "NoCharge" or "Charging".
    pub charging_status: String,

    /// Battery percentage. `None` when the log carried no valid 0-100 value.
    pub level: Option<u8>,
}

// =============================================================================
// Line classification
// =============================================================================

/// A validated device record pulled from one log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    /// Opaque dedup key: the compact JSON text of `productId`.
    pub device_key: String,

    /// The status carried by the line.
    pub status: BatteryStatus,
}

/// Outcome of classifying a single log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// The line carries a complete device status record.
    Record(DeviceRecord),

    /// The line is not a status record. Most lines are unrelated noise.
    NotApplicable(SkipReason),
}

/// Why a line was not treated as a status record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// No brace-delimited substring on the line.
    NoPayload,

    /// The brace-delimited substring is not valid JSON.
    MalformedPayload,

    /// The outer document has no string `newValue` field.
    MissingNewValue,

    /// The `newValue` string is not valid JSON.
    MalformedNewValue,

    /// The inner document lacks a required field (dotted path).
    MissingField(&'static str),
}

impl SkipReason {
    /// Short label for diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::NoPayload => "no payload",
            SkipReason::MalformedPayload => "malformed payload",
            SkipReason::MissingNewValue => "missing newValue",
            SkipReason::MalformedNewValue => "malformed newValue",
            SkipReason::MissingField(field) => *field,
        }
    }
}

// =============================================================================
// Extraction results
// =============================================================================

/// Counters collected during one scan of a log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Lines visited.
    pub lines_scanned: u64,

    /// Lines that classified as a device record (including duplicates).
    pub records_matched: u64,

    /// Records dropped because a newer line already resolved the device.
    pub duplicates_skipped: u64,

    /// Lines that were not status records.
    pub lines_not_applicable: u64,
}

/// Statuses extracted from one file plus the scan counters.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// One status per device, in the order the devices were first resolved
    /// while scanning backwards (newest first).
    pub statuses: Vec<BatteryStatus>,

    /// Counters for diagnostics.
    pub stats: ExtractStats,
}

/// A successful status check together with where and when it happened.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// The log file the statuses were read from.
    pub log_file: PathBuf,

    /// Local time at which the check ran.
    pub checked_at: DateTime<Local>,

    /// One status per device, newest-first-seen order.
    pub statuses: Vec<BatteryStatus>,
}

// =============================================================================
// Monitor progress
// =============================================================================

/// Messages sent from the background monitor thread.
#[derive(Debug, Clone)]
pub enum MonitorUpdate {
    /// Result of one status check.
    Status(Result<StatusReport, StatusError>),

    /// The monitor thread stopped after a cancel request.
    Stopped,
}
