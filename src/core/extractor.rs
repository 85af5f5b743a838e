// RazerBattery - core/extractor.rs
//
// Turns the text of one background-manager log into the latest battery
// status per device.
//
// Lines are appended chronologically, so the file is scanned from the last
// line backwards and the first record seen for a device is its current
// state. Every line goes through `classify_line`, which either yields a
// validated record or says why the line does not apply; nothing at line level
// is an error.
//
// Payload shape (double-encoded):
//
//   ... {"newValue":"{\"productId\":..,\"productName\":{\"en\":..},
//        \"powerStatus\":{\"chargingStatus\":..,\"level\":..}}", ...} ...

use crate::core::model::{
    BatteryStatus, DeviceRecord, ExtractStats, Extraction, LineClass, SkipReason,
};
use crate::util::constants;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

fn payload_regex() -> &'static Regex {
    static PAYLOAD: OnceLock<Regex> = OnceLock::new();
    PAYLOAD.get_or_init(|| {
        Regex::new(constants::PAYLOAD_PATTERN).expect("payload_regex: invalid regex")
    })
}

fn line_break_regex() -> &'static Regex {
    static LINE_BREAK: OnceLock<Regex> = OnceLock::new();
    LINE_BREAK.get_or_init(|| {
        Regex::new(constants::LINE_BREAK_PATTERN).expect("line_break_regex: invalid regex")
    })
}

/// Split log text into lines on `\r\n`, lone `\r` or `\n`.
///
/// A trailing break does not produce an empty final line.
pub fn split_lines(content: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = line_break_regex().split(content).collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Classify one log line.
pub fn classify_line(line: &str) -> LineClass {
    match decode_record(line) {
        Ok(record) => LineClass::Record(record),
        Err(reason) => LineClass::NotApplicable(reason),
    }
}

fn decode_record(line: &str) -> Result<DeviceRecord, SkipReason> {
    let raw = payload_regex()
        .find(line)
        .ok_or(SkipReason::NoPayload)?
        .as_str();

    let outer: Value = serde_json::from_str(raw).map_err(|_| SkipReason::MalformedPayload)?;

    let encoded = outer
        .get(constants::FIELD_NEW_VALUE)
        .and_then(Value::as_str)
        .ok_or(SkipReason::MissingNewValue)?;

    let inner: Value = serde_json::from_str(encoded).map_err(|_| SkipReason::MalformedNewValue)?;

    let product_id = inner
        .get(constants::FIELD_PRODUCT_ID)
        .ok_or(SkipReason::MissingField("productId"))?;
    let name = inner
        .get(constants::FIELD_PRODUCT_NAME)
        .and_then(|n| n.get(constants::FIELD_PRODUCT_NAME_LOCALE))
        .ok_or(SkipReason::MissingField("productName.en"))?;
    let power = inner
        .get(constants::FIELD_POWER_STATUS)
        .ok_or(SkipReason::MissingField("powerStatus"))?;
    let charging = power
        .get(constants::FIELD_CHARGING_STATUS)
        .ok_or(SkipReason::MissingField("powerStatus.chargingStatus"))?;
    let level = power
        .get(constants::FIELD_LEVEL)
        .ok_or(SkipReason::MissingField("powerStatus.level"))?;

    Ok(DeviceRecord {
        device_key: product_id.to_string(),
        status: BatteryStatus {
            device_name: value_text(name),
            charging_status: value_text(charging),
            level: battery_level(level),
        },
    })
}

/// Strings verbatim, anything else as compact JSON text.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A JSON integer in 0..=100, otherwise unknown.
fn battery_level(value: &Value) -> Option<u8> {
    value
        .as_u64()
        .filter(|level| *level <= u64::from(constants::MAX_BATTERY_LEVEL))
        .and_then(|level| u8::try_from(level).ok())
}

/// Extract the latest status per device from log text.
///
/// The result lists devices in the order they were first resolved while
/// scanning backwards, i.e. the device with the most recent record first.
pub fn extract_statuses(content: &str) -> Extraction {
    let mut seen: HashSet<String> = HashSet::new();
    let mut statuses = Vec::new();
    let mut stats = ExtractStats::default();

    for line in split_lines(content).into_iter().rev() {
        stats.lines_scanned += 1;

        let record = match classify_line(line) {
            LineClass::Record(record) => record,
            LineClass::NotApplicable(reason) => {
                stats.lines_not_applicable += 1;
                if reason != SkipReason::NoPayload {
                    tracing::trace!(
                        reason = reason.label(),
                        line = %preview(line),
                        "Skipping line"
                    );
                }
                continue;
            }
        };

        stats.records_matched += 1;
        if !seen.insert(record.device_key) {
            stats.duplicates_skipped += 1;
            continue;
        }
        statuses.push(record.status);
    }

    Extraction { statuses, stats }
}

/// Read `path` (lossy UTF-8) and extract the latest status per device.
///
/// Only an I/O failure is an error; an empty result is left to the caller.
pub fn extract_from_file(path: &Path) -> std::io::Result<Extraction> {
    let content = crate::platform::fs::read_file_lossy(path)?;
    let extraction = extract_statuses(&content);

    tracing::debug!(
        file = %path.display(),
        devices = extraction.statuses.len(),
        lines = extraction.stats.lines_scanned,
        matched = extraction.stats.records_matched,
        duplicates = extraction.stats.duplicates_skipped,
        "Log file scanned"
    );

    Ok(extraction)
}

fn preview(line: &str) -> &str {
    match line.char_indices().nth(constants::DEBUG_MAX_LINE_PREVIEW) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a log line the way the vendor writes it: an inner JSON document
    /// serialised into the `newValue` string of an outer document.
    fn status_line(product_id: u64, name: &str, charging: &str, level: i64) -> String {
        let inner = serde_json::json!({
            "productId": product_id,
            "productName": { "en": name, "de": name },
            "powerStatus": { "chargingStatus": charging, "level": level },
        });
        let outer = serde_json::json!({
            "key": "device",
            "newValue": inner.to_string(),
        });
        format!("[2025-03-01 10:00:00.000] [info] Device changed {outer}")
    }

    fn line_with_inner(inner: serde_json::Value) -> String {
        let outer = serde_json::json!({ "newValue": inner.to_string() });
        format!("[info] {outer}")
    }

    #[test]
    fn test_classify_valid_line() {
        let line = status_line(165, "Razer Viper V2 Pro", "NoCharge", 73);
        match classify_line(&line) {
            LineClass::Record(record) => {
                assert_eq!(record.device_key, "165");
                assert_eq!(record.status.device_name, "Razer Viper V2 Pro");
                assert_eq!(record.status.charging_status, "NoCharge");
                assert_eq!(record.status.level, Some(73));
            }
            other => panic!("expected a record, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_no_payload() {
        assert_eq!(
            classify_line("[info] Synapse service started"),
            LineClass::NotApplicable(SkipReason::NoPayload)
        );
    }

    #[test]
    fn test_classify_malformed_payload() {
        assert_eq!(
            classify_line("[info] state {not json}"),
            LineClass::NotApplicable(SkipReason::MalformedPayload)
        );
    }

    #[test]
    fn test_classify_payload_without_new_value() {
        assert_eq!(
            classify_line(r#"[info] {"oldValue":"{}"}"#),
            LineClass::NotApplicable(SkipReason::MissingNewValue)
        );
        // newValue must be a string, not an already-decoded object.
        assert_eq!(
            classify_line(r#"[info] {"newValue":{"productId":1}}"#),
            LineClass::NotApplicable(SkipReason::MissingNewValue)
        );
    }

    #[test]
    fn test_classify_malformed_inner_document() {
        assert_eq!(
            classify_line(r#"[info] {"newValue":"{broken"}"#),
            LineClass::NotApplicable(SkipReason::MalformedNewValue)
        );
    }

    #[test]
    fn test_classify_missing_fields() {
        let no_power = line_with_inner(serde_json::json!({
            "productId": 1,
            "productName": { "en": "Mouse" },
        }));
        assert_eq!(
            classify_line(&no_power),
            LineClass::NotApplicable(SkipReason::MissingField("powerStatus"))
        );

        let no_level = line_with_inner(serde_json::json!({
            "productId": 1,
            "productName": { "en": "Mouse" },
            "powerStatus": { "chargingStatus": "Charging" },
        }));
        assert_eq!(
            classify_line(&no_level),
            LineClass::NotApplicable(SkipReason::MissingField("powerStatus.level"))
        );

        let no_english_name = line_with_inner(serde_json::json!({
            "productId": 1,
            "productName": { "de": "Maus" },
            "powerStatus": { "chargingStatus": "Charging", "level": 5 },
        }));
        assert_eq!(
            classify_line(&no_english_name),
            LineClass::NotApplicable(SkipReason::MissingField("productName.en"))
        );
    }

    #[test]
    fn test_payload_spans_first_to_last_brace() {
        // Text between two JSON objects breaks the greedy capture.
        let line = format!(
            "{} trailing {{\"x\":1}}",
            status_line(1, "Mouse", "NoCharge", 10)
        );
        assert_eq!(
            classify_line(&line),
            LineClass::NotApplicable(SkipReason::MalformedPayload)
        );
    }

    #[test]
    fn test_invalid_level_is_kept_as_unknown() {
        for level in [
            serde_json::json!(null),
            serde_json::json!("85"),
            serde_json::json!(150),
            serde_json::json!(-1),
            serde_json::json!(42.5),
        ] {
            let line = line_with_inner(serde_json::json!({
                "productId": 7,
                "productName": { "en": "Headset" },
                "powerStatus": { "chargingStatus": "NoCharge", "level": level },
            }));
            match classify_line(&line) {
                LineClass::Record(record) => assert_eq!(record.status.level, None),
                other => panic!("expected a record for level {level}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_boundary_levels() {
        for level in [0, 100] {
            let line = status_line(1, "Mouse", "NoCharge", level);
            match classify_line(&line) {
                LineClass::Record(record) => {
                    assert_eq!(record.status.level, Some(level as u8))
                }
                other => panic!("expected a record, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_non_string_name_rendered_as_json_text() {
        let line = line_with_inner(serde_json::json!({
            "productId": "abc",
            "productName": { "en": 12 },
            "powerStatus": { "chargingStatus": true, "level": 50 },
        }));
        match classify_line(&line) {
            LineClass::Record(record) => {
                assert_eq!(record.device_key, "\"abc\"");
                assert_eq!(record.status.device_name, "12");
                assert_eq!(record.status.charging_status, "true");
            }
            other => panic!("expected a record, got {other:?}"),
        }
    }

    #[test]
    fn test_newest_line_wins() {
        let content = [
            status_line(1, "Mouse", "NoCharge", 50),
            status_line(1, "Mouse", "Charging", 80),
        ]
        .join("\n");
        let extraction = extract_statuses(&content);
        assert_eq!(extraction.statuses.len(), 1);
        assert_eq!(extraction.statuses[0].level, Some(80));
        assert_eq!(extraction.statuses[0].charging_status, "Charging");
        assert_eq!(extraction.stats.duplicates_skipped, 1);
    }

    #[test]
    fn test_order_is_newest_device_first() {
        let content = [
            status_line(1, "Mouse", "NoCharge", 40),
            status_line(2, "Keyboard", "NoCharge", 90),
            status_line(1, "Mouse", "NoCharge", 39),
        ]
        .join("\n");
        let names: Vec<_> = extract_statuses(&content)
            .statuses
            .into_iter()
            .map(|s| s.device_name)
            .collect();
        assert_eq!(names, vec!["Mouse", "Keyboard"]);
    }

    #[test]
    fn test_same_id_different_json_types_are_distinct_devices() {
        let a = line_with_inner(serde_json::json!({
            "productId": 1,
            "productName": { "en": "A" },
            "powerStatus": { "chargingStatus": "NoCharge", "level": 10 },
        }));
        let b = line_with_inner(serde_json::json!({
            "productId": "1",
            "productName": { "en": "B" },
            "powerStatus": { "chargingStatus": "NoCharge", "level": 20 },
        }));
        let extraction = extract_statuses(&format!("{a}\n{b}"));
        assert_eq!(extraction.statuses.len(), 2);
    }

    #[test]
    fn test_split_lines_terminators() {
        assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n\nb\r"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\r\r\n"), vec!["a", ""]);
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("\n"), vec![""]);
    }

    #[test]
    fn test_lone_carriage_return_separates_records() {
        let content = format!(
            "{}\r{}\r",
            status_line(1, "Mouse", "NoCharge", 61),
            status_line(2, "Keyboard", "Charging", 12),
        );

        let extraction = extract_statuses(&content);
        let names: Vec<_> = extraction
            .statuses
            .iter()
            .map(|s| s.device_name.as_str())
            .collect();
        assert_eq!(names, vec!["Keyboard", "Mouse"]);
        assert_eq!(extraction.stats.lines_scanned, 2);
        assert_eq!(extraction.stats.records_matched, 2);
    }

    #[test]
    fn test_noise_contributes_nothing() {
        let partial = line_with_inner(serde_json::json!({
            "productId": 3,
            "productName": { "en": "Headset" },
        }));
        let content = [
            "[info] app started".to_string(),
            status_line(1, "Mouse", "NoCharge", 61),
            "{garbage".to_string(),
            partial,
            status_line(2, "Keyboard", "Charging", 12),
            "[warn] {\"newValue\": 5}".to_string(),
            String::new(),
            status_line(1, "Mouse", "NoCharge", 60),
        ]
        .join("\r\n");

        let extraction = extract_statuses(&content);
        assert_eq!(
            extraction.statuses,
            vec![
                BatteryStatus {
                    device_name: "Mouse".to_string(),
                    charging_status: "NoCharge".to_string(),
                    level: Some(60),
                },
                BatteryStatus {
                    device_name: "Keyboard".to_string(),
                    charging_status: "Charging".to_string(),
                    level: Some(12),
                },
            ]
        );
        assert_eq!(extraction.stats.lines_scanned, 8);
        assert_eq!(extraction.stats.records_matched, 3);
        assert_eq!(extraction.stats.lines_not_applicable, 5);
        assert_eq!(extraction.stats.duplicates_skipped, 1);
    }

    #[test]
    fn test_empty_content() {
        let extraction = extract_statuses("");
        assert!(extraction.statuses.is_empty());
        assert_eq!(extraction.stats, ExtractStats::default());
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(constants::DEBUG_MAX_LINE_PREVIEW + 10);
        assert_eq!(
            preview(&long).chars().count(),
            constants::DEBUG_MAX_LINE_PREVIEW
        );
        assert_eq!(preview("short"), "short");
    }
}
