//! Autocomplete candidates for free-text camera settings.

use crate::fields::{preset_options, Field};
use crate::log_entry::LogEntry;

/// Maximum candidates offered at once.
pub const MAX_SUGGESTIONS: usize = 5;

/// Candidates for `field` given the current `input`.
///
/// Recently used values (newest entry first) come before the preset list;
/// duplicates are dropped case-insensitively. A non-empty input keeps only
/// candidates containing it (case-insensitive) and drops an exact match.
pub fn suggestions(field: Field, input: &str, entries: &[LogEntry]) -> Vec<String> {
    let needle = input.trim().to_lowercase();
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();

    let recent = entries.iter().rev().filter_map(|e| e.field_text(field));
    let presets = preset_options(field).iter().map(|s| s.to_string());

    for candidate in recent.chain(presets) {
        let folded = candidate.to_lowercase();
        if seen.contains(&folded) {
            continue;
        }
        seen.push(folded.clone());
        if !needle.is_empty() && (!folded.contains(&needle) || folded == needle) {
            continue;
        }
        out.push(candidate);
        if out.len() == MAX_SUGGESTIONS {
            break;
        }
    }
    out
}
