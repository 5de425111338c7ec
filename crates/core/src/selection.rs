//! Multi-select state for browsing and exporting log entries.

use std::collections::BTreeSet;

use crate::log_entry::LogEntry;
use crate::types::EntryId;

/// Set of selected entry ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<EntryId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select every entry in `entries`.
    pub fn all(entries: &[LogEntry]) -> Self {
        Self {
            ids: entries.iter().map(|e| e.id.clone()).collect(),
        }
    }

    /// Flip one id. Returns `true` if the id is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn select_all(&mut self, entries: &[LogEntry]) {
        self.ids.extend(entries.iter().map(|e| e.id.clone()));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True when the list is non-empty and every entry in it is selected.
    pub fn covers(&self, entries: &[LogEntry]) -> bool {
        !entries.is_empty() && entries.iter().all(|e| self.ids.contains(&e.id))
    }

    /// Selected entries, in list order.
    pub fn filter<'a>(&self, entries: &'a [LogEntry]) -> Vec<&'a LogEntry> {
        entries.iter().filter(|e| self.ids.contains(&e.id)).collect()
    }

    /// Number of selected entries marked circled.
    pub fn circled_count(&self, entries: &[LogEntry]) -> usize {
        self.filter(entries).iter().filter(|e| e.circled).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::LogDraft;
    use crate::fields::Field;
    use crate::log_entry::now;

    fn entry(id: &str, circled: bool) -> LogEntry {
        let mut draft = LogDraft::default();
        draft.set(Field::Camera, "A-Cam");
        draft.set(Field::Roll, "1");
        draft.set(Field::Take, "1");
        draft.circled = circled;
        LogEntry::from_draft(id.to_string(), &draft, now()).unwrap()
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut sel = Selection::new();
        assert!(sel.toggle("a"));
        assert!(sel.is_selected("a"));
        assert!(!sel.toggle("a"));
        assert!(sel.is_empty());
    }

    #[test]
    fn select_all_and_covers() {
        let entries = vec![entry("a", false), entry("b", true)];
        let mut sel = Selection::new();
        assert!(!sel.covers(&entries));
        sel.select_all(&entries);
        assert!(sel.covers(&entries));
        assert_eq!(sel.len(), 2);
        sel.clear();
        assert!(sel.is_empty());
        assert!(!Selection::new().covers(&[]));
    }

    #[test]
    fn filter_keeps_list_order() {
        let entries = vec![entry("c", false), entry("a", true), entry("b", true)];
        let mut sel = Selection::new();
        sel.toggle("b");
        sel.toggle("c");
        let ids: Vec<&str> = sel.filter(&entries).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
        assert_eq!(sel.circled_count(&entries), 1);
    }
}
