//! Date and time display utilities.
//!
//! Calendar dates use the medium style (`1 Jan 2024`); timestamps are shown
//! in the system time zone.

use std::fmt;

use jiff::{Timestamp, civil::Date, tz::TimeZone};

/// strftime pattern of the medium date style.
pub const MEDIUM_DATE_FORMAT: &str = "%-d %b %Y";

/// A wrapper around `Timestamp` that formats it in the system time zone.
///
/// The display format follows the pattern: `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A calendar date in the medium style: unpadded day, abbreviated month
/// name, four-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediumDate(pub Date);

impl fmt::Display for MediumDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime(MEDIUM_DATE_FORMAT))
    }
}

/// Formats a date in the medium style.
///
/// ```
/// use itineria_core::display::format_date;
/// use jiff::civil::date;
///
/// assert_eq!(format_date(date(2024, 1, 1)), "1 Jan 2024");
/// ```
pub fn format_date(date: Date) -> String {
    MediumDate(date).to_string()
}
