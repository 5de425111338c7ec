//! Presentation helpers for log lists.
//!
//! Calendar dates and times of day are read on the wall clock of the time
//! zone passed in; the CLI passes `chrono::Local`.

use chrono::{Datelike, TimeZone};

use crate::log_entry::LogEntry;
use crate::types::{wall_clock, Timestamp};

/// Short relative label for when an entry was logged.
///
/// `Just now`, `12m ago`, `5h ago`, `3d ago`, then `Mar 4` within the same
/// year and `Mar 4, 2023` otherwise.
pub fn relative_date<Tz: TimeZone>(at: Timestamp, now: Timestamp, tz: &Tz) -> String {
    let elapsed = now.signed_duration_since(at);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if hours < 1 {
        if minutes <= 1 {
            "Just now".to_string()
        } else {
            format!("{minutes}m ago")
        }
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        let (at, now) = (wall_clock(at, tz), wall_clock(now, tz));
        if at.year() == now.year() {
            at.format("%b %-d").to_string()
        } else {
            at.format("%b %-d, %Y").to_string()
        }
    }
}

/// `HH:MM` of the take timestamp, else the timecode, else `HH:MM` of creation.
pub fn time_info<Tz: TimeZone>(entry: &LogEntry, tz: &Tz) -> String {
    if let Some(at) = entry.shot_at(tz) {
        return at.format("%H:%M").to_string();
    }
    if let Some(tc) = entry.timecode.as_deref() {
        return tc.to_string();
    }
    wall_clock(entry.created_at, tz).format("%H:%M").to_string()
}

/// One-line summary used by list views.
pub fn list_line<Tz: TimeZone>(entry: &LogEntry, now: Timestamp, tz: &Tz) -> String {
    format!(
        "{}  {}{}  {} · Roll {} · {} · {}",
        entry.id,
        entry.headline(),
        if entry.circled { " (circled)" } else { "" },
        entry.camera,
        entry.roll,
        time_info(entry, tz),
        relative_date(entry.created_at, now, tz),
    )
}
