// RazerBattery - platform/fs.rs
//
// Filesystem helpers shared by the read path.

use std::io;
use std::path::Path;

/// Read the full content of a file as a string.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD rather than failing, so
/// a log with a torn multi-byte character still scans.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
