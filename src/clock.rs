//! Timestamp helpers

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

/// Current time in the local offset, falling back to UTC when the local
/// offset cannot be determined (e.g. multi-threaded processes on Unix).
pub(crate) fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// ISO-8601 / RFC 3339 rendering, second precision
pub(crate) fn iso8601(at: OffsetDateTime) -> String {
    let at = at.replace_nanosecond(0).unwrap_or(at);
    at.format(&Rfc3339)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}

/// Compact `YYYYmmdd_HHMMSS` stamp used in file names
pub(crate) fn file_stamp(at: OffsetDateTime) -> String {
    let format = format_description!("[year][month][day]_[hour][minute][second]");
    at.format(&format)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}
