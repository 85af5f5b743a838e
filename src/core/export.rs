// RazerBattery - core/export.rs
//
// Text, CSV and JSON rendering of a status check.
// Core layer: writes to any Write trait object.

use crate::core::model::{BatteryStatus, StatusReport};
use crate::core::summary::{self, Glyph};
use crate::util::error::{ExportError, StatusError};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::io::Write;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Glyph line followed by one line per device.
    #[default]
    Text,
    /// One JSON object per check.
    Json,
    /// `device_name,charging_status,level` rows.
    Csv,
}

/// Write the outcome of one check in `format`.
pub fn write_outcome<W: Write>(
    outcome: &Result<StatusReport, StatusError>,
    format: OutputFormat,
    writer: W,
) -> Result<(), ExportError> {
    match format {
        OutputFormat::Text => write_text(outcome, writer),
        OutputFormat::Json => write_json(outcome, writer),
        OutputFormat::Csv => match outcome {
            Ok(report) => write_csv(&report.statuses, writer).map(|_| ()),
            // CSV has no error row; the error goes to the log and exit code.
            Err(_) => Ok(()),
        },
    }
}

/// Glyph line, then the tray-style title.
pub fn write_text<W: Write>(
    outcome: &Result<StatusReport, StatusError>,
    mut writer: W,
) -> Result<(), ExportError> {
    let glyph = glyph_for(outcome);
    let title = title_for(outcome);

    writeln!(writer, "[{glyph}]")
        .and_then(|_| writeln!(writer, "{title}"))
        .and_then(|_| writer.flush())
        .map_err(|e| ExportError::Io {
            target: "text".to_string(),
            source: e,
        })
}

fn glyph_for(outcome: &Result<StatusReport, StatusError>) -> Glyph {
    Glyph::for_outcome(match outcome {
        Ok(report) => Ok(report.statuses.as_slice()),
        Err(e) => Err(*e),
    })
}

fn title_for(outcome: &Result<StatusReport, StatusError>) -> String {
    match outcome {
        Ok(report) => summary::status_title(&report.statuses),
        Err(e) => summary::error_title(*e),
    }
}

/// Export statuses to CSV. Returns the number of rows written.
pub fn write_csv<W: Write>(statuses: &[BatteryStatus], writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["device_name", "charging_status", "level"])
        .map_err(|e| ExportError::Csv {
            target: "csv".to_string(),
            source: e,
        })?;

    let mut count = 0;
    for status in statuses {
        let level = status.level.map(|l| l.to_string()).unwrap_or_default();
        csv_writer
            .write_record([
                status.device_name.as_str(),
                status.charging_status.as_str(),
                level.as_str(),
            ])
            .map_err(|e| ExportError::Csv {
                target: "csv".to_string(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        target: "csv".to_string(),
        source: e,
    })?;

    Ok(count)
}

/// JSON shape of one check. `glyph`, `color` and `title` are what a tray
/// icon would show (title cut to the tooltip limit).
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum JsonOutcome<'a> {
    Ok {
        glyph: String,
        color: (u8, u8, u8),
        title: String,
        log_file: String,
        checked_at: DateTime<Local>,
        lowest_level: u8,
        statuses: &'a [BatteryStatus],
    },
    Err {
        glyph: String,
        color: (u8, u8, u8),
        title: String,
        error: &'static str,
        message: String,
    },
}

/// Export one check as a single-line JSON object.
pub fn write_json<W: Write>(
    outcome: &Result<StatusReport, StatusError>,
    mut writer: W,
) -> Result<(), ExportError> {
    let glyph = glyph_for(outcome);
    let color = glyph.band().rgb();
    let full_title = title_for(outcome);
    let title = summary::truncate_title(&full_title).to_string();

    let value = match outcome {
        Ok(report) => JsonOutcome::Ok {
            glyph: glyph.to_string(),
            color,
            title,
            log_file: report.log_file.display().to_string(),
            checked_at: report.checked_at,
            lowest_level: summary::lowest_level(&report.statuses),
            statuses: &report.statuses,
        },
        Err(e) => JsonOutcome::Err {
            glyph: glyph.to_string(),
            color,
            title,
            error: e.name(),
            message: e.to_string(),
        },
    };

    serde_json::to_writer(&mut writer, &value).map_err(|e| ExportError::Json {
        target: "json".to_string(),
        source: e,
    })?;
    writeln!(writer)
        .and_then(|_| writer.flush())
        .map_err(|e| ExportError::Io {
            target: "json".to_string(),
            source: e,
        })
}
