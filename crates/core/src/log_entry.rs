//! Persisted camera log entry.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::draft::LogDraft;
use crate::error::CoreError;
use crate::fields::Field;
use crate::types::{wall_clock, EntryId, Timestamp};
use crate::validation::evaluator::{parse_timestamp_in, parse_whole, validate_draft};
use crate::validation::rules::describe;

/// One recorded take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: EntryId,
    pub camera: String,
    #[serde(deserialize_with = "lenient::whole")]
    pub roll: u32,
    #[serde(deserialize_with = "lenient::whole")]
    pub take: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_stop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shutter: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_whole",
        skip_serializing_if = "Option::is_none"
    )]
    pub iso: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white_balance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub circled: bool,
    #[serde(
        default,
        deserialize_with = "lenient::optional_whole",
        skip_serializing_if = "Option::is_none"
    )]
    pub clips: Option<u32>,
    /// Wall-clock time of the take, as entered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// SMPTE-style `HH:MM:SS:FF`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timecode: Option<String>,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// Typed field values extracted from a fully valid draft.
struct EntryFields {
    camera: String,
    roll: u32,
    take: u32,
    scene: Option<String>,
    shot: Option<String>,
    slate: Option<String>,
    lens: Option<String>,
    filter: Option<String>,
    lut: Option<String>,
    f_stop: Option<String>,
    shutter: Option<String>,
    iso: Option<u32>,
    white_balance: Option<String>,
    user: Option<String>,
    notes: Option<String>,
    circled: bool,
    clips: Option<u32>,
    timestamp: Option<String>,
    timecode: Option<String>,
}

impl EntryFields {
    fn from_draft(draft: &LogDraft, now: Timestamp) -> Result<Self, CoreError> {
        let errors = validate_draft(draft, now);
        if !errors.is_empty() {
            return Err(CoreError::Validation(describe(&errors)));
        }

        Ok(Self {
            camera: draft.camera.clone(),
            roll: required_number(&draft.roll, "roll")?,
            take: required_number(&draft.take, "take")?,
            scene: optional_text(&draft.scene),
            shot: optional_text(&draft.shot),
            slate: optional_text(&draft.slate),
            lens: optional_text(&draft.lens),
            filter: optional_text(&draft.filter),
            lut: optional_text(&draft.lut),
            f_stop: optional_text(&draft.f_stop),
            shutter: optional_text(&draft.shutter),
            iso: optional_number(&draft.iso, "iso")?,
            white_balance: optional_text(&draft.white_balance),
            user: optional_text(&draft.user),
            notes: optional_text(&draft.notes),
            circled: draft.circled,
            clips: optional_number(&draft.clips, "clips")?,
            timestamp: optional_text(&draft.timestamp),
            timecode: optional_text(&draft.timecode),
        })
    }
}

impl LogEntry {
    /// Build a new entry from a draft. The draft must validate in full.
    pub fn from_draft(id: EntryId, draft: &LogDraft, now: Timestamp) -> Result<Self, CoreError> {
        let f = EntryFields::from_draft(draft, now)?;
        Ok(Self {
            id,
            camera: f.camera,
            roll: f.roll,
            take: f.take,
            scene: f.scene,
            shot: f.shot,
            slate: f.slate,
            lens: f.lens,
            filter: f.filter,
            lut: f.lut,
            f_stop: f.f_stop,
            shutter: f.shutter,
            iso: f.iso,
            white_balance: f.white_balance,
            user: f.user,
            notes: f.notes,
            circled: f.circled,
            clips: f.clips,
            timestamp: f.timestamp,
            timecode: f.timecode,
            created_at: now,
            updated_at: None,
        })
    }

    /// Produce the edited version of this entry: draft fields replace the
    /// current ones, `id` and `created_at` are kept, `updated_at` is set to
    /// `now`.
    pub fn with_draft(&self, draft: &LogDraft, now: Timestamp) -> Result<Self, CoreError> {
        let mut next = Self::from_draft(self.id.clone(), draft, now)?;
        next.created_at = self.created_at;
        next.updated_at = Some(now);
        Ok(next)
    }

    /// Display text of a field, `None` when absent.
    pub fn field_text(&self, field: Field) -> Option<String> {
        let text = |v: &Option<String>| v.clone();
        match field {
            Field::Camera => Some(self.camera.clone()),
            Field::Roll => Some(self.roll.to_string()),
            Field::Take => Some(self.take.to_string()),
            Field::Timestamp => text(&self.timestamp),
            Field::Timecode => text(&self.timecode),
            Field::Clips => self.clips.map(|n| n.to_string()),
            Field::Lens => text(&self.lens),
            Field::Filter => text(&self.filter),
            Field::Lut => text(&self.lut),
            Field::FStop => text(&self.f_stop),
            Field::Shutter => text(&self.shutter),
            Field::Iso => self.iso.map(|n| n.to_string()),
            Field::WhiteBalance => text(&self.white_balance),
            Field::User => text(&self.user),
            Field::Scene => text(&self.scene),
            Field::Shot => text(&self.shot),
            Field::Slate => text(&self.slate),
            Field::Notes => text(&self.notes),
            Field::Circled => self.circled.then(|| "Yes".to_string()),
        }
    }

    /// Parsed take timestamp on the wall clock of `tz`, if one was recorded
    /// and parses.
    pub fn shot_at<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDateTime> {
        self.timestamp
            .as_deref()
            .and_then(|raw| parse_timestamp_in(raw, tz))
    }

    /// Date used to group and range entries: the calendar day of creation on
    /// the wall clock of `tz`.
    pub fn log_date<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        wall_clock(self.created_at, tz).date()
    }

    /// `Scene <scene> - Take <take>` heading shown in lists and reports.
    pub fn headline(&self) -> String {
        format!(
            "Scene {} - Take {}",
            self.scene.as_deref().unwrap_or("N/A"),
            self.take
        )
    }
}

/// Generate a fresh entry id: UUID v7, a millisecond timestamp followed by
/// random bits.
pub fn generate_id() -> EntryId {
    uuid::Uuid::now_v7().to_string()
}

/// Current UTC time; the single clock read used by stores and sessions.
pub fn now() -> Timestamp {
    Utc::now()
}

fn optional_text(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn required_number(raw: &str, field: &str) -> Result<u32, CoreError> {
    optional_number(raw, field)?
        .ok_or_else(|| CoreError::Validation(format!("{field} is required")))
}

fn optional_number(raw: &str, field: &str) -> Result<Option<u32>, CoreError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_whole(raw)
        .and_then(|n| u32::try_from(n).ok())
        .map(Some)
        .ok_or_else(|| CoreError::Validation(format!("{field} must be a whole number")))
}

// ---------------------------------------------------------------------------
// Lenient numbers
// ---------------------------------------------------------------------------

/// Numeric fields read either as JSON numbers or as the text layout older
/// stores wrote (`"roll": "1"`, `"iso": ""`).
mod lenient {
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(u32),
        Text(String),
    }

    impl NumberOrText {
        /// Blank text is absent.
        fn into_whole<E: Error>(self) -> Result<Option<u32>, E> {
            match self {
                Self::Number(n) => Ok(Some(n)),
                Self::Text(text) if text.trim().is_empty() => Ok(None),
                Self::Text(text) => text
                    .trim()
                    .parse()
                    .map(Some)
                    .map_err(|_| E::custom(format!("expected a whole number, found `{text}`"))),
            }
        }
    }

    pub fn whole<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        NumberOrText::deserialize(deserializer)?
            .into_whole()?
            .ok_or_else(|| D::Error::custom("expected a whole number, found blank text"))
    }

    pub fn optional_whole<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u32>, D::Error> {
        match Option::<NumberOrText>::deserialize(deserializer)? {
            Some(value) => value.into_whole(),
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
