use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use camlog_cli::cli::Cli;
use camlog_cli::commands;
use camlog_cli::config::{AppConfig, LogFormat};
use camlog_db::{FileBlobStore, LogEntryRepo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // --- Configuration ---
    let config = AppConfig::from_env()?;

    // --- Tracing ---
    init_tracing(config.log_format);
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        export_dir = %config.export_dir.display(),
        "Loaded configuration"
    );

    // --- Storage ---
    let mut repo = LogEntryRepo::open(FileBlobStore::new(&config.data_dir)).await;

    let mut stdout = std::io::stdout().lock();
    commands::run(cli.command, &mut repo, &config, &mut stdout).await?;
    Ok(())
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "camlog_cli=info,camlog_db=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
