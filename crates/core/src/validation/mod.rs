//! Field validation engine.
//!
//! One canonical rule table for every form field, plus a pure evaluator with
//! no storage or UI dependencies.

pub mod evaluator;
pub mod rules;

pub use evaluator::{validate, validate_at, validate_draft, validate_in, validate_key};
pub use rules::{describe, violations, ErrorMap, FieldViolation};
