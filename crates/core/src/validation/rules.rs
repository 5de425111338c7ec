//! Canonical field rule table: limits, character sets, and result types.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::fields::Field;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub const MAX_CAMERA_LENGTH: usize = 100;

pub const MIN_ROLL: i64 = 1;
pub const MAX_ROLL: i64 = 9_999;

pub const MIN_TAKE: i64 = 1;
pub const MAX_TAKE: i64 = 999;

pub const MIN_CLIPS: i64 = 1;
pub const MAX_CLIPS: i64 = 100;

pub const MIN_LENS_LENGTH: usize = 2;
pub const MAX_LENS_LENGTH: usize = 100;

pub const MAX_FILTER_LENGTH: usize = 50;
pub const MAX_LUT_LENGTH: usize = 50;

/// Inclusive f-stop / t-stop range.
pub const MIN_F_STOP: f64 = 0.5;
pub const MAX_F_STOP: f64 = 45.0;

/// Denominator range for `1/N` shutter speeds.
pub const MIN_SHUTTER_SPEED: u64 = 1;
pub const MAX_SHUTTER_SPEED: u64 = 8_000;

/// Shutter angle range in degrees.
pub const MIN_SHUTTER_ANGLE: u64 = 1;
pub const MAX_SHUTTER_ANGLE: u64 = 360;

pub const MIN_ISO: i64 = 25;
pub const MAX_ISO: i64 = 409_600;

pub const MAX_WHITE_BALANCE_LENGTH: usize = 30;
pub const MAX_USER_LENGTH: usize = 3;
pub const MAX_SCENE_LENGTH: usize = 20;
pub const MAX_SHOT_LENGTH: usize = 10;
pub const MAX_SLATE_LENGTH: usize = 20;
pub const MAX_NOTES_LENGTH: usize = 500;

/// Timecode component maxima (24/30 fps timebase, frames 00-29).
pub const MAX_TC_HOURS: u32 = 23;
pub const MAX_TC_MINUTES: u32 = 59;
pub const MAX_TC_SECONDS: u32 = 59;
pub const MAX_TC_FRAMES: u32 = 29;

/// How far past today a take timestamp may lie.
pub const MAX_FUTURE_MONTHS: u32 = 12;

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

pub(crate) static TIMECODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}:[0-9]{2}$").expect("valid regex"));

pub(crate) static LENS_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s\-./°]+$").expect("valid regex"));

pub(crate) static FILTER_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s\-./°()]+$").expect("valid regex"));

pub(crate) static LUT_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s\-_.]+$").expect("valid regex"));

pub(crate) static F_STOP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[fFtT]/)?([0-9]+\.?[0-9]*)$").expect("valid regex"));

pub(crate) static SHUTTER_SPEED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1/([0-9]+)$").expect("valid regex"));

pub(crate) static SHUTTER_ANGLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)°$").expect("valid regex"));

pub(crate) static SHUTTER_FPS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[0-9]+fps$").expect("valid regex"));

pub(crate) static BARE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.?[0-9]*$").expect("valid regex"));

pub(crate) static LETTERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Field errors keyed by field, iterated in form order.
pub type ErrorMap = BTreeMap<Field, String>;

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldViolation {
    pub field: Field,
    pub message: String,
}

/// Flatten an error map into violations, preserving form order.
pub fn violations(errors: &ErrorMap) -> Vec<FieldViolation> {
    errors
        .iter()
        .map(|(field, message)| FieldViolation {
            field: *field,
            message: message.clone(),
        })
        .collect()
}

/// Join an error map into a single human-readable line.
pub fn describe(errors: &ErrorMap) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}
