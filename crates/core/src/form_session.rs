//! Form session controller: draft state, touched tracking, and submit flow.
//!
//! A session owns one draft. Blurring a field marks it touched and
//! validates it; later changes to a touched field re-validate that field
//! only. `submit` validates every declared field and only reaches the store
//! when the whole draft is clean.

use std::collections::BTreeSet;
use std::future::Future;

use serde::Serialize;

use crate::draft::LogDraft;
use crate::error::CoreError;
use crate::fields::Field;
use crate::log_entry::{now, LogEntry};
use crate::types::{EntryId, Timestamp};
use crate::validation::evaluator::validate_at;
use crate::validation::rules::ErrorMap;

// ---------------------------------------------------------------------------
// Store port
// ---------------------------------------------------------------------------

/// Persistence operations a form session needs from the record store.
pub trait EntryStore: Send {
    /// Persist a new entry built from `draft`.
    fn create(
        &mut self,
        draft: &LogDraft,
    ) -> impl Future<Output = Result<LogEntry, CoreError>> + Send;

    /// Replace the entry `id` with `draft`. `Ok(None)` when no such entry exists.
    fn update(
        &mut self,
        id: &str,
        draft: &LogDraft,
    ) -> impl Future<Output = Result<Option<LogEntry>, CoreError>> + Send;
}

// ---------------------------------------------------------------------------
// Session types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No field touched yet.
    Clean,
    Editing,
    /// Draft validated; the store call is in flight.
    Submitting,
    /// Terminal.
    Saved,
}

/// Whether the session creates a new entry or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMode {
    Create,
    Edit { id: EntryId },
}

/// Result of [`FormSession::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The store accepted the draft.
    Saved(LogEntry),
    /// Validation failed; the store was not called.
    Invalid {
        errors: ErrorMap,
        /// First invalid field in form order; the one to focus.
        focus: Field,
    },
    /// The store rejected or could not persist the draft. Draft kept intact.
    SaveFailed { reason: String },
    /// Submit was not possible in the current state (already saving/saved).
    Rejected,
}

/// Derived validation counters for status indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub has_errors: bool,
    pub error_count: usize,
    pub touched_count: usize,
    pub missing_required: usize,
    pub is_valid: bool,
}

// ---------------------------------------------------------------------------
// FormSession
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FormSession {
    draft: LogDraft,
    mode: SessionMode,
    state: SessionState,
    touched: BTreeSet<Field>,
    errors: ErrorMap,
    focus: Option<Field>,
    save_failed: bool,
}

impl FormSession {
    /// Open a session that creates a new entry from `draft`.
    pub fn new(draft: LogDraft) -> Self {
        Self::with_mode(draft, SessionMode::Create)
    }

    /// Open a session editing `entry`.
    pub fn edit(entry: &LogEntry) -> Self {
        Self::with_mode(
            LogDraft::from_entry(entry),
            SessionMode::Edit {
                id: entry.id.clone(),
            },
        )
    }

    fn with_mode(draft: LogDraft, mode: SessionMode) -> Self {
        Self {
            draft,
            mode,
            state: SessionState::Clean,
            touched: BTreeSet::new(),
            errors: ErrorMap::new(),
            focus: None,
            save_failed: false,
        }
    }

    pub fn draft(&self) -> &LogDraft {
        &self.draft
    }

    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Invalid fields in form order.
    pub fn invalid_fields(&self) -> Vec<Field> {
        self.errors.keys().copied().collect()
    }

    /// Field to focus after a failed submit.
    pub fn focus_target(&self) -> Option<Field> {
        self.focus
    }

    /// Whether the last store call failed.
    pub fn save_failed(&self) -> bool {
        self.save_failed
    }

    /// Update a field's value; re-validate it if already touched.
    pub fn on_change(&mut self, field: Field, value: impl Into<String>) {
        self.on_change_at(field, value, now());
    }

    pub fn on_change_at(&mut self, field: Field, value: impl Into<String>, at: Timestamp) {
        if self.is_closed() {
            tracing::debug!(%field, "Ignoring change on closed form session");
            return;
        }
        self.draft.set(field, value);
        if self.touched.contains(&field) {
            self.revalidate(field, at);
        }
    }

    /// Mark a field touched and validate it.
    pub fn on_blur(&mut self, field: Field) {
        self.on_blur_at(field, now());
    }

    pub fn on_blur_at(&mut self, field: Field, at: Timestamp) {
        if self.is_closed() {
            return;
        }
        self.touched.insert(field);
        self.state = SessionState::Editing;
        self.revalidate(field, at);
    }

    /// No errors and every required field present.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.draft.missing_required().is_empty()
    }

    /// Whether the submit action should be enabled: not while saving, and
    /// not while touched fields carry errors.
    pub fn can_submit(&self) -> bool {
        !self.is_closed() && self.errors.is_empty()
    }

    pub fn summary(&self) -> ValidationSummary {
        let missing_required = self.draft.missing_required().len();
        ValidationSummary {
            has_errors: !self.errors.is_empty(),
            error_count: self.errors.len(),
            touched_count: self.touched.len(),
            missing_required,
            is_valid: self.errors.is_empty() && missing_required == 0,
        }
    }

    /// `"N field(s) need(s) attention..."`, or `None` when there are no errors.
    pub fn attention_message(&self) -> Option<String> {
        match self.errors.len() {
            0 => None,
            1 => Some("1 field needs attention. Please check the highlighted fields.".to_string()),
            n => Some(format!(
                "{n} fields need attention. Please check the highlighted fields."
            )),
        }
    }

    /// Validate every declared field and, if clean, hand the draft to `store`.
    pub async fn submit<S: EntryStore>(&mut self, store: &mut S) -> SubmitOutcome {
        self.submit_at(store, now()).await
    }

    pub async fn submit_at<S: EntryStore>(
        &mut self,
        store: &mut S,
        at: Timestamp,
    ) -> SubmitOutcome {
        if self.is_closed() {
            return SubmitOutcome::Rejected;
        }

        self.touched.extend(Field::ALL);
        self.errors = Field::ALL
            .into_iter()
            .filter_map(|field| {
                validate_at(field, &self.draft.value(field), at).map(|message| (field, message))
            })
            .collect();

        if let Some(&focus) = self.errors.keys().next() {
            self.state = SessionState::Editing;
            self.focus = Some(focus);
            tracing::debug!(
                error_count = self.errors.len(),
                %focus,
                "Form submit blocked by validation errors"
            );
            return SubmitOutcome::Invalid {
                errors: self.errors.clone(),
                focus,
            };
        }

        self.focus = None;
        self.save_failed = false;

        let result = {
            let _in_flight = InFlight::enter(&mut self.state);
            match &self.mode {
                SessionMode::Create => store.create(&self.draft).await.map(Some),
                SessionMode::Edit { id } => store.update(id, &self.draft).await,
            }
        };

        match result {
            Ok(Some(entry)) => {
                self.state = SessionState::Saved;
                SubmitOutcome::Saved(entry)
            }
            Ok(None) => self.fail("Log entry no longer exists".to_string()),
            Err(err) => self.fail(err.to_string()),
        }
    }

    fn fail(&mut self, reason: String) -> SubmitOutcome {
        tracing::warn!(%reason, "Form submit failed to save");
        self.state = SessionState::Editing;
        self.save_failed = true;
        SubmitOutcome::SaveFailed { reason }
    }

    fn revalidate(&mut self, field: Field, at: Timestamp) {
        match validate_at(field, &self.draft.value(field), at) {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    fn is_closed(&self) -> bool {
        matches!(self.state, SessionState::Submitting | SessionState::Saved)
    }
}

/// Keeps a session in `Submitting` while a store call is pending. Dropping
/// it, including when the submit future is cancelled mid-call, puts the
/// session back to `Editing`.
struct InFlight<'a> {
    state: &'a mut SessionState,
}

impl<'a> InFlight<'a> {
    fn enter(state: &'a mut SessionState) -> Self {
        *state = SessionState::Submitting;
        Self { state }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.state = SessionState::Editing;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
