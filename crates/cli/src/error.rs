use camlog_core::error::CoreError;
use camlog_core::fields::Field;

/// Errors surfaced by `camlog` commands.
///
/// Wraps [`CoreError`] for domain errors and adds command-line specific
/// variants.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A domain-level error from `camlog_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Arguments that parse but cannot be acted on.
    #[error("{0}")]
    Usage(String),

    /// A submitted entry failed validation; the field errors were printed.
    #[error("Entry not saved: {count} field(s) need attention")]
    InvalidEntry { count: usize },

    #[error("Invalid {field}: {message}")]
    InvalidValue { field: Field, message: String },

    #[error("Save failed: {0}")]
    SaveFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
