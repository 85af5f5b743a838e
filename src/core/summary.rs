// RazerBattery - core/summary.rs
//
// Pure presentation helpers shared by every front end: the glyph shown in
// place of an icon, its colour band, and the multi-line title text.

use crate::core::model::BatteryStatus;
use crate::util::constants;
use crate::util::error::StatusError;
use std::fmt;

/// Lowest known battery level across `statuses`.
///
/// Starts from 100, so a list with no known level reports 100.
pub fn lowest_level(statuses: &[BatteryStatus]) -> u8 {
    statuses
        .iter()
        .filter_map(|s| s.level)
        .fold(constants::MAX_BATTERY_LEVEL, u8::min)
}

/// One line per device: `<name> - <level>%`, `?` for an unknown level.
pub fn status_title(statuses: &[BatteryStatus]) -> String {
    statuses
        .iter()
        .map(|s| match s.level {
            Some(level) => format!("{} - {level}%", s.device_name),
            None => format!("{} - ?%", s.device_name),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Title shown when the status check failed.
pub fn error_title(err: StatusError) -> String {
    format!("Error: {}", err.name())
}

/// Cut `text` to the tray tooltip limit without splitting a character.
pub fn truncate_title(text: &str) -> &str {
    match text.char_indices().nth(constants::MAX_TITLE_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// =============================================================================
// Level bands
// =============================================================================

/// Colour class of a battery glyph; lower levels are redder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelBand {
    Green,
    Lime,
    LightOrange,
    Orange,
    Red,
    /// Non-numeric glyph (error or pending).
    Unknown,
}

impl LevelBand {
    /// Band for a battery percentage.
    pub fn for_level(level: u8) -> Self {
        if level >= constants::BAND_GREEN_MIN {
            LevelBand::Green
        } else if level >= constants::BAND_LIME_MIN {
            LevelBand::Lime
        } else if level >= constants::BAND_LIGHT_ORANGE_MIN {
            LevelBand::LightOrange
        } else if level >= constants::BAND_ORANGE_MIN {
            LevelBand::Orange
        } else {
            LevelBand::Red
        }
    }

    /// Foreground colour as an RGB triple.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            LevelBand::Green => (98, 252, 3),
            LevelBand::Lime => (175, 255, 3),
            LevelBand::LightOrange => (255, 210, 0),
            LevelBand::Orange => (255, 137, 0),
            LevelBand::Red => (255, 0, 0),
            LevelBand::Unknown => (0, 0, 0),
        }
    }
}

// =============================================================================
// Glyph
// =============================================================================

/// What an icon renderer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Lowest battery level.
    Level(u8),
    /// The last check failed.
    Error,
    /// No check has completed yet.
    Pending,
}

impl Glyph {
    /// Glyph for the outcome of one status check.
    pub fn for_outcome(outcome: Result<&[BatteryStatus], StatusError>) -> Self {
        match outcome {
            Ok(statuses) => Glyph::Level(lowest_level(statuses)),
            Err(_) => Glyph::Error,
        }
    }

    pub fn band(&self) -> LevelBand {
        match self {
            Glyph::Level(level) => LevelBand::for_level(*level),
            Glyph::Error | Glyph::Pending => LevelBand::Unknown,
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Glyph::Level(level) => write!(f, "{level}"),
            Glyph::Error => f.write_str(constants::ERROR_GLYPH),
            Glyph::Pending => f.write_str(constants::PENDING_GLYPH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(name: &str, level: Option<u8>) -> BatteryStatus {
        BatteryStatus {
            device_name: name.to_string(),
            charging_status: "NoCharge".to_string(),
            level,
        }
    }

    #[test]
    fn test_lowest_level_ignores_unknown() {
        let statuses = vec![
            status("Mouse", Some(64)),
            status("Keyboard", None),
            status("Headset", Some(31)),
        ];
        assert_eq!(lowest_level(&statuses), 31);
        assert_eq!(lowest_level(&[status("Keyboard", None)]), 100);
        assert_eq!(lowest_level(&[]), 100);
    }

    #[test]
    fn test_status_title_lines() {
        let statuses = vec![status("Mouse", Some(64)), status("Keyboard", None)];
        assert_eq!(status_title(&statuses), "Mouse - 64%\nKeyboard - ?%");
    }

    #[test]
    fn test_error_title_uses_variant_name() {
        assert_eq!(error_title(StatusError::NoLogFile), "Error: NoLogFile");
    }

    #[test]
    fn test_truncate_title() {
        let long = "ü".repeat(200);
        assert_eq!(truncate_title(&long).chars().count(), constants::MAX_TITLE_CHARS);
        assert_eq!(truncate_title("Mouse - 5%"), "Mouse - 5%");
    }

    #[test]
    fn test_level_band_thresholds() {
        assert_eq!(LevelBand::for_level(100), LevelBand::Green);
        assert_eq!(LevelBand::for_level(80), LevelBand::Green);
        assert_eq!(LevelBand::for_level(79), LevelBand::Lime);
        assert_eq!(LevelBand::for_level(60), LevelBand::Lime);
        assert_eq!(LevelBand::for_level(59), LevelBand::LightOrange);
        assert_eq!(LevelBand::for_level(40), LevelBand::LightOrange);
        assert_eq!(LevelBand::for_level(39), LevelBand::Orange);
        assert_eq!(LevelBand::for_level(20), LevelBand::Orange);
        assert_eq!(LevelBand::for_level(19), LevelBand::Red);
        assert_eq!(LevelBand::for_level(0), LevelBand::Red);
    }

    #[test]
    fn test_glyph_for_outcome() {
        let statuses = vec![status("Mouse", Some(12))];
        let glyph = Glyph::for_outcome(Ok(statuses.as_slice()));
        assert_eq!(glyph, Glyph::Level(12));
        assert_eq!(glyph.band(), LevelBand::Red);
        assert_eq!(glyph.to_string(), "12");

        let err = Glyph::for_outcome(Err(StatusError::ParseFailure));
        assert_eq!(err.to_string(), "!");
        assert_eq!(err.band().rgb(), (0, 0, 0));
        assert_eq!(Glyph::Pending.to_string(), "...");
    }
}
