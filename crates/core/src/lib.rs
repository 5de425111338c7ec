//! Domain logic for the camera log: fields and their rules, drafts, entries,
//! the form session, selection, suggestions, and export reports.
//!
//! Nothing here touches storage or I/O; persistence is reached through the
//! [`form_session::EntryStore`] port.

pub mod display;
pub mod draft;
pub mod error;
pub mod fields;
pub mod form_session;
pub mod log_entry;
pub mod report;
pub mod selection;
pub mod suggest;
pub mod types;
pub mod validation;
