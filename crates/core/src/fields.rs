//! Form field catalogue for camera log entries.
//!
//! [`Field`] enumerates every declared form field in the order the form
//! presents them. That order drives submit-time validation and decides which
//! invalid field receives focus first.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Field enum
// ---------------------------------------------------------------------------

/// A declared field of the camera log form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Camera,
    Roll,
    Take,
    Timestamp,
    Timecode,
    Clips,
    Lens,
    Filter,
    Lut,
    FStop,
    Shutter,
    Iso,
    WhiteBalance,
    User,
    Scene,
    Shot,
    Slate,
    Notes,
    Circled,
}

impl Field {
    /// Every declared field, in form order.
    pub const ALL: [Field; 19] = [
        Field::Camera,
        Field::Roll,
        Field::Take,
        Field::Timestamp,
        Field::Timecode,
        Field::Clips,
        Field::Lens,
        Field::Filter,
        Field::Lut,
        Field::FStop,
        Field::Shutter,
        Field::Iso,
        Field::WhiteBalance,
        Field::User,
        Field::Scene,
        Field::Shot,
        Field::Slate,
        Field::Notes,
        Field::Circled,
    ];

    /// Fields that must be present before an entry can be persisted.
    pub const REQUIRED: [Field; 3] = [Field::Camera, Field::Roll, Field::Take];

    /// Stable camelCase key, matching the persisted JSON layout.
    pub fn key(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Roll => "roll",
            Self::Take => "take",
            Self::Timestamp => "timestamp",
            Self::Timecode => "timecode",
            Self::Clips => "clips",
            Self::Lens => "lens",
            Self::Filter => "filter",
            Self::Lut => "lut",
            Self::FStop => "fStop",
            Self::Shutter => "shutter",
            Self::Iso => "iso",
            Self::WhiteBalance => "whiteBalance",
            Self::User => "user",
            Self::Scene => "scene",
            Self::Shot => "shot",
            Self::Slate => "slate",
            Self::Notes => "notes",
            Self::Circled => "circled",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Camera => "Camera",
            Self::Roll => "Roll",
            Self::Take => "Take",
            Self::Timestamp => "Timestamp",
            Self::Timecode => "Timecode",
            Self::Clips => "Clips",
            Self::Lens => "Lens",
            Self::Filter => "Filter",
            Self::Lut => "LUT",
            Self::FStop => "F-Stop",
            Self::Shutter => "Shutter",
            Self::Iso => "ISO",
            Self::WhiteBalance => "WB",
            Self::User => "User",
            Self::Scene => "Scene",
            Self::Shot => "Shot",
            Self::Slate => "Slate",
            Self::Notes => "Notes",
            Self::Circled => "Circled",
        }
    }

    /// Look a field up by its camelCase key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Preset option lists
// ---------------------------------------------------------------------------

pub const CAMERA_OPTIONS: &[&str] = &["A-Cam", "B-Cam", "C-Cam", "Drone", "Steady"];

pub const LENS_OPTIONS: &[&str] = &[
    "35mm",
    "50mm",
    "85mm",
    "24-70mm",
    "70-200mm",
    "50mm Anamorphic",
];

pub const FILTER_OPTIONS: &[&str] = &["None", "ND0.3", "ND0.6", "ND0.9", "ND1.2", "Polarizer"];

pub const LUT_OPTIONS: &[&str] = &["LUT1", "LUT2", "Rec709", "LogC", "Custom"];

pub const F_STOP_OPTIONS: &[&str] = &[
    "f/1.4", "f/2", "f/2.8", "f/4", "f/5.6", "f/8", "f/11", "f/16",
];

pub const SHUTTER_OPTIONS: &[&str] = &["1/50", "1/100", "1/200", "180°", "360°"];

pub const WB_OPTIONS: &[&str] = &["3200K", "4300K", "5600K", "6500K", "Custom"];

/// Preset choices offered for a field, empty for free-form fields.
pub fn preset_options(field: Field) -> &'static [&'static str] {
    match field {
        Field::Camera => CAMERA_OPTIONS,
        Field::Lens => LENS_OPTIONS,
        Field::Filter => FILTER_OPTIONS,
        Field::Lut => LUT_OPTIONS,
        Field::FStop => F_STOP_OPTIONS,
        Field::Shutter => SHUTTER_OPTIONS,
        Field::WhiteBalance => WB_OPTIONS,
        _ => &[],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
