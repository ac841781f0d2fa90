//! File-export helpers.
//!
//! The engine has no clock dependency; the host supplies wall-clock parts
//! when the user triggers an export.

use std::fmt;

/// Wall-clock parts for a timestamped export filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportStamp {
    /// Day of month, 1..=31.
    pub day: u8,
    /// Month, 1..=12.
    pub month: u8,
    /// Full year.
    pub year: u16,
    /// Hour, 0..=23.
    pub hour: u8,
    /// Minute, 0..=59.
    pub minute: u8,
    /// Second, 0..=59.
    pub second: u8,
}

impl fmt::Display for ExportStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}-{:02}-{}_{:02}_{:02}_{:02}",
            self.day, self.month, self.year, self.hour, self.minute, self.second
        )
    }
}

/// MIME type for exported text.
pub const EXPORT_MIME: &str = "text/plain";

/// Filename for an export triggered at the given time.
pub fn export_file_name(stamp: ExportStamp) -> String {
    format!("comfy_{stamp}.txt")
}
