//! Editable draft of a log entry.
//!
//! A draft holds the raw, as-typed form values. Nothing in a draft is
//! trusted: it becomes a [`LogEntry`](crate::log_entry::LogEntry) only after
//! the whole draft validates.

use std::borrow::Cow;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::fields::Field;
use crate::log_entry::LogEntry;

/// White balance preset applied to new drafts.
pub const DEFAULT_WHITE_BALANCE: &str = "5600K";

/// Clips-per-take applied to new drafts.
pub const DEFAULT_CLIPS: &str = "1";

/// Milliseconds per frame at the 24 fps timebase used for generated timecodes.
const MS_PER_FRAME_24FPS: f64 = 41.67;

/// In-progress form values for one log entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogDraft {
    pub camera: String,
    pub roll: String,
    pub take: String,
    pub timestamp: String,
    pub timecode: String,
    pub clips: String,
    pub lens: String,
    pub filter: String,
    pub lut: String,
    pub f_stop: String,
    pub shutter: String,
    pub iso: String,
    pub white_balance: String,
    pub user: String,
    pub scene: String,
    pub shot: String,
    pub slate: String,
    pub notes: String,
    pub circled: bool,
}

impl LogDraft {
    /// Defaults for a brand-new entry recorded at `now` (wall-clock local time).
    pub fn initial(now: NaiveDateTime) -> Self {
        Self {
            white_balance: DEFAULT_WHITE_BALANCE.to_string(),
            clips: DEFAULT_CLIPS.to_string(),
            timestamp: format_timestamp(now),
            timecode: format_timecode(now),
            ..Self::default()
        }
    }

    /// Re-open a persisted entry for editing.
    pub fn from_entry(entry: &LogEntry) -> Self {
        fn text(value: &Option<String>) -> String {
            value.clone().unwrap_or_default()
        }
        fn number(value: Option<u32>) -> String {
            value.map(|n| n.to_string()).unwrap_or_default()
        }

        Self {
            camera: entry.camera.clone(),
            roll: entry.roll.to_string(),
            take: entry.take.to_string(),
            timestamp: text(&entry.timestamp),
            timecode: text(&entry.timecode),
            clips: number(entry.clips),
            lens: text(&entry.lens),
            filter: text(&entry.filter),
            lut: text(&entry.lut),
            f_stop: text(&entry.f_stop),
            shutter: text(&entry.shutter),
            iso: number(entry.iso),
            white_balance: text(&entry.white_balance),
            user: text(&entry.user),
            scene: text(&entry.scene),
            shot: text(&entry.shot),
            slate: text(&entry.slate),
            notes: text(&entry.notes),
            circled: entry.circled,
        }
    }

    /// Raw value of a field; `circled` reads as `"true"` / `"false"`.
    pub fn value(&self, field: Field) -> Cow<'_, str> {
        match field {
            Field::Circled => Cow::Borrowed(if self.circled { "true" } else { "false" }),
            other => Cow::Borrowed(self.text_slot(other).map(String::as_str).unwrap_or("")),
        }
    }

    /// Overwrite a field with a raw value.
    ///
    /// For `circled`, `"true"`, `"1"`, `"yes"` and `"on"` (any case) set the
    /// flag; anything else clears it.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        if field == Field::Circled {
            self.circled = matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            );
            return;
        }
        if let Some(slot) = self.text_slot_mut(field) {
            *slot = value;
        }
    }

    /// Whether a field holds a non-blank value.
    pub fn is_present(&self, field: Field) -> bool {
        match field {
            Field::Circled => true,
            other => !self.value(other).trim().is_empty(),
        }
    }

    /// Required fields that are still blank, in form order.
    pub fn missing_required(&self) -> Vec<Field> {
        Field::REQUIRED
            .into_iter()
            .filter(|f| !self.is_present(*f))
            .collect()
    }

    fn text_slot(&self, field: Field) -> Option<&String> {
        Some(match field {
            Field::Camera => &self.camera,
            Field::Roll => &self.roll,
            Field::Take => &self.take,
            Field::Timestamp => &self.timestamp,
            Field::Timecode => &self.timecode,
            Field::Clips => &self.clips,
            Field::Lens => &self.lens,
            Field::Filter => &self.filter,
            Field::Lut => &self.lut,
            Field::FStop => &self.f_stop,
            Field::Shutter => &self.shutter,
            Field::Iso => &self.iso,
            Field::WhiteBalance => &self.white_balance,
            Field::User => &self.user,
            Field::Scene => &self.scene,
            Field::Shot => &self.shot,
            Field::Slate => &self.slate,
            Field::Notes => &self.notes,
            Field::Circled => return None,
        })
    }

    fn text_slot_mut(&mut self, field: Field) -> Option<&mut String> {
        Some(match field {
            Field::Camera => &mut self.camera,
            Field::Roll => &mut self.roll,
            Field::Take => &mut self.take,
            Field::Timestamp => &mut self.timestamp,
            Field::Timecode => &mut self.timecode,
            Field::Clips => &mut self.clips,
            Field::Lens => &mut self.lens,
            Field::Filter => &mut self.filter,
            Field::Lut => &mut self.lut,
            Field::FStop => &mut self.f_stop,
            Field::Shutter => &mut self.shutter,
            Field::Iso => &mut self.iso,
            Field::WhiteBalance => &mut self.white_balance,
            Field::User => &mut self.user,
            Field::Scene => &mut self.scene,
            Field::Shot => &mut self.shot,
            Field::Slate => &mut self.slate,
            Field::Notes => &mut self.notes,
            Field::Circled => return None,
        })
    }
}

/// `YYYY-MM-DDTHH:MM`, the minute-precision form value for a timestamp.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M").to_string()
}

/// `HH:MM:SS:FF` derived from wall-clock time at 24 fps.
pub fn format_timecode(at: NaiveDateTime) -> String {
    let millis = at.nanosecond() / 1_000_000 % 1_000;
    let frames = (f64::from(millis) / MS_PER_FRAME_24FPS).floor() as u32;
    format!(
        "{:02}:{:02}:{:02}:{:02}",
        at.hour(),
        at.minute(),
        at.second(),
        frames
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
