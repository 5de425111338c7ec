use chrono::{Local, NaiveDateTime, TimeZone};

/// Log entry identifiers are opaque strings (UUID v7 text for new entries).
pub type EntryId = String;

/// All persisted timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Wall-clock reading of `at` in `tz`.
///
/// Take timestamps and timecodes are entered as local wall-clock values, so
/// every calendar date and time of day derived from a [`Timestamp`] goes
/// through here rather than reading the UTC fields directly.
pub fn wall_clock<Tz: TimeZone>(at: Timestamp, tz: &Tz) -> NaiveDateTime {
    at.with_timezone(tz).naive_local()
}

/// [`wall_clock`] on this machine's local time zone.
pub fn local_wall_clock(at: Timestamp) -> NaiveDateTime {
    wall_clock(at, &Local)
}
