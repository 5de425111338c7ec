use std::path::PathBuf;
use std::str::FromStr;

use crate::error::CliError;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(CliError::Config(format!(
                "CAMLOG_LOG_FORMAT must be `text` or `json`, got `{other}`"
            ))),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the persisted blobs (default: `.camlog`).
    pub data_dir: PathBuf,
    /// Log output format (default: `text`).
    pub log_format: LogFormat,
    /// Directory reports are written to when no `--out` is given (default: `.`).
    pub export_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default   |
    /// |---------------------|-----------|
    /// | `CAMLOG_DATA_DIR`   | `.camlog` |
    /// | `CAMLOG_LOG_FORMAT` | `text`    |
    /// | `CAMLOG_EXPORT_DIR` | `.`       |
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = var("CAMLOG_DATA_DIR").unwrap_or_else(|| ".camlog".into());
        let log_format = match var("CAMLOG_LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };
        let export_dir = var("CAMLOG_EXPORT_DIR").unwrap_or_else(|| ".".into());

        Ok(Self {
            data_dir: data_dir.into(),
            log_format,
            export_dir: export_dir.into(),
        })
    }
}
