//! Per-field validator: pure logic, no state, no I/O.
//!
//! Every check returns `None` when the value is acceptable and
//! `Some(message)` otherwise. Optional fields treat a blank value (empty or
//! whitespace only) as absent.

use chrono::{DateTime, Local, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::rules::*;
use crate::draft::LogDraft;
use crate::fields::Field;
use crate::types::{wall_clock, Timestamp};

/// Validate a raw form value against the current clock.
pub fn validate(field: Field, raw: &str) -> Option<String> {
    validate_at(field, raw, Utc::now())
}

/// Validate a raw form value by its camelCase key. Unknown keys pass.
pub fn validate_key(key: &str, raw: &str) -> Option<String> {
    Field::from_key(key).and_then(|field| validate(field, raw))
}

/// Validate a raw form value; `now` is the reference for the timestamp
/// future-limit check, read on the local wall clock.
pub fn validate_at(field: Field, raw: &str, now: Timestamp) -> Option<String> {
    validate_in(field, raw, now, &Local)
}

/// [`validate_at`] with the wall clock of `tz` instead of the local one.
pub fn validate_in<Tz: TimeZone>(
    field: Field,
    raw: &str,
    now: Timestamp,
    tz: &Tz,
) -> Option<String> {
    match field {
        Field::Camera => check_camera(raw),
        Field::Roll => check_roll(raw),
        Field::Take => check_take(raw),
        Field::Timecode => optional(raw, check_timecode),
        Field::Timestamp => optional(raw, |v| check_timestamp(v, now, tz)),
        Field::Clips => optional(raw, check_clips),
        Field::Lens => optional(raw, check_lens),
        Field::Filter => optional(raw, check_filter),
        Field::Lut => optional(raw, check_lut),
        Field::FStop => optional(raw, check_f_stop),
        Field::Shutter => optional(raw, check_shutter),
        Field::Iso => optional(raw, check_iso),
        Field::WhiteBalance => optional(raw, |v| {
            too_long(v, MAX_WHITE_BALANCE_LENGTH, "White balance setting too long")
        }),
        Field::User => optional(raw, check_user),
        Field::Scene => optional(raw, |v| too_long(v, MAX_SCENE_LENGTH, "Scene name too long")),
        Field::Shot => optional(raw, |v| too_long(v, MAX_SHOT_LENGTH, "Shot name too long")),
        Field::Slate => optional(raw, |v| too_long(v, MAX_SLATE_LENGTH, "Slate info too long")),
        Field::Notes => optional(raw, |v| {
            (char_len(v) > MAX_NOTES_LENGTH).then(|| format!("Maximum {MAX_NOTES_LENGTH} characters"))
        }),
        Field::Circled => None,
    }
}

/// Validate every declared field of a draft.
pub fn validate_draft(draft: &LogDraft, now: Timestamp) -> ErrorMap {
    Field::ALL
        .into_iter()
        .filter_map(|field| {
            validate_at(field, &draft.value(field), now).map(|message| (field, message))
        })
        .collect()
}

/// Parse a take timestamp as a wall-clock value.
///
/// Accepts RFC 3339 (converted to the wall clock of `tz`),
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]`, `YYYY-MM-DD HH:MM[:SS]`, and a bare
/// `YYYY-MM-DD` (midnight).
pub fn parse_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(wall_clock(dt.with_timezone(&Utc), tz));
    }
    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse a whole number, saturating digit-only strings that overflow.
///
/// Returns `None` for anything that is not an optionally signed run of
/// ASCII digits.
pub(crate) fn parse_whole(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(if negative { i64::MIN } else { i64::MAX })
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn optional(raw: &str, check: impl FnOnce(&str) -> Option<String>) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        check(raw)
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn too_long(value: &str, max: usize, what: &str) -> Option<String> {
    (char_len(value) > max).then(|| format!("{what} (max {max} characters)"))
}

enum Bounded {
    Ok,
    NotWhole,
    Below,
    Above,
}

fn bounded(raw: &str, min: i64, max: i64) -> Bounded {
    match parse_whole(raw) {
        None => Bounded::NotWhole,
        Some(n) if n < min => Bounded::Below,
        Some(n) if n > max => Bounded::Above,
        Some(_) => Bounded::Ok,
    }
}

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

fn check_camera(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return Some("Camera is required".to_string());
    }
    too_long(raw, MAX_CAMERA_LENGTH, "Camera name too long")
}

fn check_roll(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return Some("Roll number is required".to_string());
    }
    match bounded(raw, MIN_ROLL, MAX_ROLL) {
        Bounded::NotWhole => Some("Roll number must be a whole number".to_string()),
        Bounded::Below => Some(format!("Roll number must be at least {MIN_ROLL}")),
        Bounded::Above => Some(format!("Roll number too large (max {MAX_ROLL})")),
        Bounded::Ok => None,
    }
}

fn check_take(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return Some("Take number is required".to_string());
    }
    match bounded(raw, MIN_TAKE, MAX_TAKE) {
        Bounded::NotWhole => Some("Take number must be a whole number".to_string()),
        Bounded::Below => Some(format!("Take number must be at least {MIN_TAKE}")),
        Bounded::Above => Some(format!("Take number too large (max {MAX_TAKE})")),
        Bounded::Ok => None,
    }
}

fn check_clips(raw: &str) -> Option<String> {
    match bounded(raw, MIN_CLIPS, MAX_CLIPS) {
        Bounded::NotWhole => Some("Clips must be a whole number".to_string()),
        Bounded::Below => Some(format!("Clips must be at least {MIN_CLIPS}")),
        Bounded::Above => Some(format!("Clips number too large (max {MAX_CLIPS})")),
        Bounded::Ok => None,
    }
}

fn check_iso(raw: &str) -> Option<String> {
    match bounded(raw, MIN_ISO, MAX_ISO) {
        Bounded::NotWhole => Some("ISO must be a whole number".to_string()),
        Bounded::Below | Bounded::Above => {
            Some("ISO should be between 25 and 409,600".to_string())
        }
        Bounded::Ok => None,
    }
}

fn check_timecode(raw: &str) -> Option<String> {
    if !TIMECODE_RE.is_match(raw) {
        return Some("Format should be HH:MM:SS:FF (e.g., 01:23:45:12)".to_string());
    }
    // The pattern guarantees four two-digit groups.
    let parts: Vec<u32> = raw.split(':').filter_map(|p| p.parse().ok()).collect();
    let [hours, minutes, seconds, frames] = parts[..] else {
        return Some("Format should be HH:MM:SS:FF (e.g., 01:23:45:12)".to_string());
    };
    if hours > MAX_TC_HOURS {
        Some("Hours must be 00-23".to_string())
    } else if minutes > MAX_TC_MINUTES {
        Some("Minutes must be 00-59".to_string())
    } else if seconds > MAX_TC_SECONDS {
        Some("Seconds must be 00-59".to_string())
    } else if frames > MAX_TC_FRAMES {
        Some("Frames must be 00-29".to_string())
    } else {
        None
    }
}

/// Rejects values past local midnight of today's date next year.
fn check_timestamp<Tz: TimeZone>(raw: &str, now: Timestamp, tz: &Tz) -> Option<String> {
    let Some(ts) = parse_timestamp_in(raw, tz) else {
        return Some("Invalid timestamp format".to_string());
    };
    let limit = wall_clock(now, tz)
        .date()
        .checked_add_months(Months::new(MAX_FUTURE_MONTHS))
        .and_then(|d| d.and_hms_opt(0, 0, 0));
    match limit {
        Some(limit) if ts > limit => {
            Some("Timestamp cannot be more than a year in the future".to_string())
        }
        _ => None,
    }
}

fn check_lens(raw: &str) -> Option<String> {
    let len = char_len(raw);
    if len < MIN_LENS_LENGTH {
        return Some(format!(
            "Lens name too short (min {MIN_LENS_LENGTH} characters)"
        ));
    }
    if len > MAX_LENS_LENGTH {
        return Some(format!(
            "Lens name too long (max {MAX_LENS_LENGTH} characters)"
        ));
    }
    (!LENS_CHARS_RE.is_match(raw)).then(|| "Lens name contains invalid characters".to_string())
}

fn check_filter(raw: &str) -> Option<String> {
    too_long(raw, MAX_FILTER_LENGTH, "Filter name too long").or_else(|| {
        (!FILTER_CHARS_RE.is_match(raw))
            .then(|| "Filter name contains invalid characters".to_string())
    })
}

fn check_lut(raw: &str) -> Option<String> {
    too_long(raw, MAX_LUT_LENGTH, "LUT name too long").or_else(|| {
        (!LUT_CHARS_RE.is_match(raw)).then(|| "LUT name contains invalid characters".to_string())
    })
}

fn check_f_stop(raw: &str) -> Option<String> {
    let Some(caps) = F_STOP_RE.captures(raw) else {
        return Some("Format: f/2.8, T/2.1, or 2.8".to_string());
    };
    let value: f64 = caps[1].parse().unwrap_or(f64::NAN);
    if (MIN_F_STOP..=MAX_F_STOP).contains(&value) {
        None
    } else {
        Some("F-stop should be between f/0.5 and f/45".to_string())
    }
}

fn check_shutter(raw: &str) -> Option<String> {
    if let Some(caps) = SHUTTER_SPEED_RE.captures(raw) {
        let speed = caps[1].parse::<u64>().unwrap_or(u64::MAX);
        return (!(MIN_SHUTTER_SPEED..=MAX_SHUTTER_SPEED).contains(&speed))
            .then(|| "Shutter speed should be between 1/1 and 1/8000".to_string());
    }
    if let Some(caps) = SHUTTER_ANGLE_RE.captures(raw) {
        let angle = caps[1].parse::<u64>().unwrap_or(u64::MAX);
        return (!(MIN_SHUTTER_ANGLE..=MAX_SHUTTER_ANGLE).contains(&angle))
            .then(|| "Shutter angle should be between 1° and 360°".to_string());
    }
    if SHUTTER_FPS_RE.is_match(raw) || BARE_NUMBER_RE.is_match(raw) {
        return None;
    }
    Some("Format: 1/50, 180°, 24fps, or numeric value".to_string())
}

fn check_user(raw: &str) -> Option<String> {
    if char_len(raw) > MAX_USER_LENGTH {
        return Some(format!("Maximum {MAX_USER_LENGTH} characters"));
    }
    (!LETTERS_RE.is_match(raw)).then(|| "Only letters allowed".to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn check(field: Field, raw: &str) -> Option<String> {
        validate_in(field, raw, now(), &Utc)
    }

    // -- required fields ---------------------------------------------------

    #[test]
    fn camera_required() {
        assert_eq!(check(Field::Camera, "").as_deref(), Some("Camera is required"));
        assert_eq!(check(Field::Camera, "   ").as_deref(), Some("Camera is required"));
        assert!(check(Field::Camera, "A-Cam").is_none());
    }

    #[test]
    fn camera_length_limit() {
        assert!(check(Field::Camera, &"x".repeat(100)).is_none());
        let msg = check(Field::Camera, &"x".repeat(101)).unwrap();
        assert!(msg.contains("max 100"));
    }

    #[test]
    fn roll_accepts_full_range() {
        for r in 1..=9_999 {
            assert_eq!(check(Field::Roll, &r.to_string()), None, "roll {r}");
        }
        assert!(check(Field::Roll, "0").is_some());
        assert!(check(Field::Roll, "10000").is_some());
    }

    #[test]
    fn roll_rejects_out_of_range_and_non_integers() {
        for raw in ["0", "-1", "10000", "1.5", "abc", "12abc", "99999999999999999999"] {
            assert!(check(Field::Roll, raw).is_some(), "roll {raw}");
        }
        assert_eq!(check(Field::Roll, "").as_deref(), Some("Roll number is required"));
        assert_eq!(
            check(Field::Roll, "10000").as_deref(),
            Some("Roll number too large (max 9999)")
        );
    }

    #[test]
    fn take_bounds() {
        assert!(check(Field::Take, "1").is_none());
        assert!(check(Field::Take, "999").is_none());
        assert!(check(Field::Take, "1000").is_some());
        assert_eq!(check(Field::Take, "0").as_deref(), Some("Take number must be at least 1"));
        assert_eq!(check(Field::Take, "").as_deref(), Some("Take number is required"));
    }

    // -- timecode ------------------------------------------------------------

    #[test]
    fn timecode_valid() {
        for tc in ["00:00:00:00", "01:23:45:12", "23:59:59:29"] {
            assert!(check(Field::Timecode, tc).is_none(), "{tc}");
        }
    }

    #[test]
    fn timecode_component_ranges() {
        assert_eq!(check(Field::Timecode, "24:00:00:00").as_deref(), Some("Hours must be 00-23"));
        assert_eq!(check(Field::Timecode, "00:60:00:00").as_deref(), Some("Minutes must be 00-59"));
        assert_eq!(check(Field::Timecode, "00:00:60:00").as_deref(), Some("Seconds must be 00-59"));
        assert_eq!(check(Field::Timecode, "00:00:00:30").as_deref(), Some("Frames must be 00-29"));
    }

    #[test]
    fn timecode_format() {
        assert!(check(Field::Timecode, "1:23:45:12").is_some());
        assert!(check(Field::Timecode, "01:23:45").is_some());
        assert!(check(Field::Timecode, "01-23-45-12").is_some());
        assert!(check(Field::Timecode, "").is_none());
        assert!(check(Field::Timecode, "  ").is_none());
    }

    // -- timestamp -----------------------------------------------------------

    #[test]
    fn timestamp_formats() {
        assert!(check(Field::Timestamp, "2024-06-15T10:30").is_none());
        assert!(check(Field::Timestamp, "2024-06-15T10:30:15").is_none());
        assert!(check(Field::Timestamp, "2024-06-15 10:30").is_none());
        assert!(check(Field::Timestamp, "2024-06-15T10:30:00Z").is_none());
        assert!(check(Field::Timestamp, "2024-06-15").is_none());
        assert_eq!(
            check(Field::Timestamp, "yesterday").as_deref(),
            Some("Invalid timestamp format")
        );
        assert!(check(Field::Timestamp, "2024-13-01T00:00").is_some());
    }

    #[test]
    fn timestamp_future_limit() {
        assert!(check(Field::Timestamp, "2025-06-15T00:00").is_none());
        assert_eq!(
            check(Field::Timestamp, "2025-06-15T00:01").as_deref(),
            Some("Timestamp cannot be more than a year in the future")
        );
        assert!(check(Field::Timestamp, "1999-01-01T00:00").is_none());
    }

    #[test]
    fn timestamp_future_limit_uses_local_date() {
        // 2024-06-14 20:00 on a UTC-7 wall clock.
        let evening = Utc.with_ymd_and_hms(2024, 6, 15, 3, 0, 0).unwrap();
        let pacific = FixedOffset::west_opt(7 * 3600).unwrap();
        let late = "2025-06-14T23:00";

        assert!(validate_in(Field::Timestamp, "2025-06-14T00:00", evening, &pacific).is_none());
        assert_eq!(
            validate_in(Field::Timestamp, late, evening, &pacific).as_deref(),
            Some("Timestamp cannot be more than a year in the future")
        );
        assert!(validate_in(Field::Timestamp, late, evening, &Utc).is_none());
    }

    #[test]
    fn rfc3339_timestamps_read_on_local_wall_clock() {
        let pacific = FixedOffset::west_opt(7 * 3600).unwrap();
        let parsed = parse_timestamp_in("2024-06-15T03:00:00Z", &pacific).unwrap();
        assert_eq!(parsed.to_string(), "2024-06-14 20:00:00");
        let naive = parse_timestamp_in("2024-06-15T03:00", &pacific).unwrap();
        assert_eq!(naive.to_string(), "2024-06-15 03:00:00");
    }

    // -- numeric optionals ---------------------------------------------------

    #[test]
    fn clips_bounds() {
        assert!(check(Field::Clips, "").is_none());
        assert!(check(Field::Clips, "1").is_none());
        assert!(check(Field::Clips, "100").is_none());
        assert!(check(Field::Clips, "0").is_some());
        assert!(check(Field::Clips, "101").is_some());
        assert!(check(Field::Clips, "two").is_some());
    }

    #[test]
    fn iso_bounds() {
        assert!(check(Field::Iso, "25").is_none());
        assert!(check(Field::Iso, "800").is_none());
        assert!(check(Field::Iso, "409600").is_none());
        assert_eq!(
            check(Field::Iso, "24").as_deref(),
            Some("ISO should be between 25 and 409,600")
        );
        assert!(check(Field::Iso, "409601").is_some());
        assert_eq!(check(Field::Iso, "fast").as_deref(), Some("ISO must be a whole number"));
    }

    // -- optics --------------------------------------------------------------

    #[test]
    fn lens_rules() {
        assert!(check(Field::Lens, "50mm Anamorphic").is_none());
        assert!(check(Field::Lens, "24-70mm").is_none());
        assert!(check(Field::Lens, "Cooke S4/i 32mm").is_none());
        assert!(check(Field::Lens, "8").unwrap().contains("too short"));
        assert!(check(Field::Lens, &"a".repeat(101)).unwrap().contains("too long"));
        assert!(check(Field::Lens, "50mm*").unwrap().contains("invalid characters"));
    }

    #[test]
    fn filter_allows_parentheses() {
        assert!(check(Field::Filter, "ND0.9 (IR)").is_none());
        assert!(check(Field::Lens, "50mm (IR)").is_some());
        assert!(check(Field::Filter, "ND#3").is_some());
        assert!(check(Field::Filter, &"N".repeat(51)).is_some());
    }

    #[test]
    fn lut_rules() {
        assert!(check(Field::Lut, "Rec709_v2.cube").is_none());
        assert!(check(Field::Lut, "Rec709/v2").is_some());
    }

    #[test]
    fn f_stop_rules() {
        for ok in ["f/2.8", "F/1.4", "T/2.1", "t/16", "2.8", "0.5", "45", "4."] {
            assert!(check(Field::FStop, ok).is_none(), "{ok}");
        }
        assert_eq!(
            check(Field::FStop, "f2.8").as_deref(),
            Some("Format: f/2.8, T/2.1, or 2.8")
        );
        assert!(check(Field::FStop, "0.4").is_some());
        assert!(check(Field::FStop, "f/64").is_some());
    }

    #[test]
    fn shutter_rules() {
        for ok in ["1/50", "1/8000", "1/1", "180°", "360°", "24fps", "24FPS", "48", "172.8"] {
            assert!(check(Field::Shutter, ok).is_none(), "{ok}");
        }
        assert!(check(Field::Shutter, "1/0").unwrap().contains("1/8000"));
        assert!(check(Field::Shutter, "1/9000").is_some());
        assert!(check(Field::Shutter, "0°").unwrap().contains("360°"));
        assert!(check(Field::Shutter, "361°").is_some());
        assert!(check(Field::Shutter, "2/50").unwrap().starts_with("Format"));
    }

    // -- text fields ---------------------------------------------------------

    #[test]
    fn user_initials() {
        assert!(check(Field::User, "ab").is_none());
        assert!(check(Field::User, "ABC").is_none());
        assert_eq!(check(Field::User, "ABCD").as_deref(), Some("Maximum 3 characters"));
        assert_eq!(check(Field::User, "A1").as_deref(), Some("Only letters allowed"));
    }

    #[test]
    fn length_only_fields() {
        assert!(check(Field::WhiteBalance, "5600K").is_none());
        assert!(check(Field::WhiteBalance, &"k".repeat(31)).is_some());
        assert!(check(Field::Scene, &"s".repeat(20)).is_none());
        assert!(check(Field::Scene, &"s".repeat(21)).is_some());
        assert!(check(Field::Shot, &"s".repeat(11)).is_some());
        assert!(check(Field::Slate, &"s".repeat(21)).is_some());
        assert!(check(Field::Notes, &"n".repeat(500)).is_none());
        assert_eq!(
            check(Field::Notes, &"n".repeat(501)).as_deref(),
            Some("Maximum 500 characters")
        );
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        assert!(check(Field::Notes, &"é".repeat(500)).is_none());
        assert!(check(Field::User, "éé").is_some());
    }

    #[test]
    fn circled_never_errors() {
        assert!(check(Field::Circled, "maybe").is_none());
    }

    #[test]
    fn unknown_key_passes() {
        assert!(validate_key("aperture", "!!!").is_none());
        assert!(validate_key("camera", "").is_some());
    }

    // -- drafts --------------------------------------------------------------

    #[test]
    fn validate_draft_collects_in_form_order() {
        let mut draft = LogDraft::default();
        draft.set(Field::Iso, "5");
        draft.set(Field::Roll, "1");
        let errors = validate_draft(&draft, now());
        let fields: Vec<Field> = errors.keys().copied().collect();
        assert_eq!(fields, vec![Field::Camera, Field::Take, Field::Iso]);
    }

    #[test]
    fn parse_whole_saturates() {
        assert_eq!(parse_whole(" 42 "), Some(42));
        assert_eq!(parse_whole("+7"), Some(7));
        assert_eq!(parse_whole("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_whole("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_whole("4.0"), None);
        assert_eq!(parse_whole(""), None);
    }
}
