//! Export report: summary statistics, date grouping, and plain-text rendering.
//!
//! The report is built as a structured model first ([`ExportReport`]) so any
//! renderer can lay it out; [`render_text`] is the bundled one. Log dates,
//! times of day and the generation time are all read on one wall clock.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::display::time_info;
use crate::error::CoreError;
use crate::fields::Field;
use crate::log_entry::LogEntry;
use crate::types::{EntryId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_REPORT_TITLE: &str = "Camera Log Report";

/// File stem used when the title is blank.
pub const FALLBACK_FILE_STEM: &str = "camera-log";

/// Placeholder for empty fields when they are included.
pub const EMPTY_VALUE: &str = "—";

/// Detail rows of an entry block, in print order.
const DETAIL_FIELDS: &[Field] = &[
    Field::Camera,
    Field::Lens,
    Field::Filter,
    Field::Lut,
    Field::Roll,
    Field::Shot,
    Field::Slate,
    Field::FStop,
    Field::Shutter,
    Field::Iso,
    Field::WhiteBalance,
    Field::Clips,
    Field::Timecode,
    Field::User,
];

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// User-chosen export options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(max = 100, message = "Production name must be at most 100 characters"))]
    pub production_name: String,
    pub include_notes: bool,
    pub include_empty_fields: bool,
    pub group_by_date: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
            production_name: String::new(),
            include_notes: true,
            include_empty_fields: false,
            group_by_date: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Report model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub circled: usize,
    /// Circled share of all takes, rounded to a whole percent.
    pub success_rate: u32,
    /// Distinct cameras in first-seen order.
    pub cameras: Vec<String>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryBlock {
    pub id: EntryId,
    pub headline: String,
    pub circled: bool,
    pub time_info: String,
    pub rows: Vec<DetailRow>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateGroup {
    /// `None` for the single ungrouped section.
    pub label: Option<String>,
    pub entries: Vec<EntryBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub title: String,
    pub production_name: Option<String>,
    /// Generation time on the report's wall clock.
    pub generated_at: DateTime<FixedOffset>,
    pub summary: ReportSummary,
    pub groups: Vec<DateGroup>,
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

/// Build the report for `entries` (in the order given), dating entries on
/// the wall clock of `tz`.
pub fn build_report<Tz: TimeZone>(
    entries: &[&LogEntry],
    options: &ExportOptions,
    generated_at: Timestamp,
    tz: &Tz,
) -> Result<ExportReport, CoreError> {
    options
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let groups = if options.group_by_date {
        group_by_date(entries, tz)
            .into_iter()
            .map(|(date, items)| DateGroup {
                label: Some(date_label(date)),
                entries: items.iter().map(|e| entry_block(e, options, tz)).collect(),
            })
            .collect()
    } else {
        vec![DateGroup {
            label: None,
            entries: entries.iter().map(|e| entry_block(e, options, tz)).collect(),
        }]
    };

    let production_name = Some(options.production_name.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(ExportReport {
        title: options.title.clone(),
        production_name,
        generated_at: generated_at.with_timezone(tz).fixed_offset(),
        summary: summarize(entries, tz),
        groups,
    })
}

/// Summary statistics over `entries`.
pub fn summarize<Tz: TimeZone>(entries: &[&LogEntry], tz: &Tz) -> ReportSummary {
    let total = entries.len();
    let circled = entries.iter().filter(|e| e.circled).count();
    let success_rate = if total == 0 {
        0
    } else {
        (circled as f64 / total as f64 * 100.0).round() as u32
    };

    let mut cameras: Vec<String> = Vec::new();
    for entry in entries {
        if !entry.camera.is_empty() && !cameras.contains(&entry.camera) {
            cameras.push(entry.camera.clone());
        }
    }

    let dates = entries.iter().map(|e| e.log_date(tz));
    let date_range = dates
        .clone()
        .min()
        .zip(dates.max());

    ReportSummary {
        total,
        circled,
        success_rate,
        cameras,
        date_range,
    }
}

/// Entries grouped by log date, newest date first, list order within a date.
fn group_by_date<'a, Tz: TimeZone>(
    entries: &[&'a LogEntry],
    tz: &Tz,
) -> Vec<(NaiveDate, Vec<&'a LogEntry>)> {
    let mut groups: Vec<(NaiveDate, Vec<&'a LogEntry>)> = Vec::new();
    for &entry in entries {
        let date = entry.log_date(tz);
        match groups.iter_mut().find(|(d, _)| *d == date) {
            Some((_, items)) => items.push(entry),
            None => groups.push((date, vec![entry])),
        }
    }
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups
}

fn entry_block<Tz: TimeZone>(entry: &LogEntry, options: &ExportOptions, tz: &Tz) -> EntryBlock {
    let rows = DETAIL_FIELDS
        .iter()
        .filter_map(|&field| {
            let value = entry.field_text(field).filter(|v| !v.trim().is_empty());
            match value {
                Some(value) => Some(DetailRow {
                    label: field.label(),
                    value,
                }),
                None if options.include_empty_fields => Some(DetailRow {
                    label: field.label(),
                    value: EMPTY_VALUE.to_string(),
                }),
                None => None,
            }
        })
        .collect();

    EntryBlock {
        id: entry.id.clone(),
        headline: entry.headline(),
        circled: entry.circled,
        time_info: time_info(entry, tz),
        rows,
        notes: entry
            .notes
            .clone()
            .filter(|n| options.include_notes && !n.trim().is_empty()),
    }
}

/// `Monday, January 1, 2024`.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// `<title>-<YYYY-MM-DD>.txt`, falling back to `camera-log` for a blank title.
pub fn export_file_name(title: &str, date: NaiveDate) -> String {
    let stem = title.trim();
    let stem = if stem.is_empty() {
        FALLBACK_FILE_STEM.to_string()
    } else {
        stem.replace(['/', '\\'], "-")
    };
    format!("{stem}-{}.txt", date.format("%Y-%m-%d"))
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the report as plain text.
pub fn render_text(report: &ExportReport) -> String {
    let mut out = String::new();
    let s = &report.summary;

    if let Some(name) = &report.production_name {
        let _ = writeln!(out, "{name}");
    }
    let _ = writeln!(out, "{}", report.title);
    let _ = writeln!(
        out,
        "Generated on {} at {}",
        date_label(report.generated_at.date_naive()),
        report.generated_at.format("%H:%M")
    );
    let _ = writeln!(
        out,
        "Total Logs: {} | Circled Takes: {} | Cameras: {}",
        s.total,
        s.circled,
        s.cameras.len()
    );

    let _ = writeln!(out, "\nReport Summary");
    let _ = writeln!(out, "  Total Logs:     {}", s.total);
    let _ = writeln!(out, "  Circled Takes:  {}", s.circled);
    let _ = writeln!(out, "  Success Rate:   {}%", s.success_rate);
    let _ = writeln!(out, "  Cameras Used:   {}", s.cameras.len());
    if let Some((start, end)) = s.date_range {
        let _ = writeln!(
            out,
            "  Date Range:     {} to {}",
            start.format("%b %-d"),
            end.format("%b %-d")
        );
    }

    for group in &report.groups {
        if let Some(label) = &group.label {
            let _ = writeln!(out, "\n== {label} ({} logs) ==", group.entries.len());
        } else {
            out.push('\n');
        }
        for block in &group.entries {
            render_block(&mut out, block);
        }
    }

    out
}

fn render_block(out: &mut String, block: &EntryBlock) {
    let badge = if block.circled { " [CIRCLED]" } else { "" };
    let _ = writeln!(out, "\n{}{}  {}", block.headline, badge, block.time_info);
    for row in &block.rows {
        let _ = writeln!(out, "  {:<9} {}", format!("{}:", row.label), row.value);
    }
    if let Some(notes) = &block.notes {
        let _ = writeln!(out, "  Notes:");
        for line in notes.lines() {
            let _ = writeln!(out, "    {line}");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
