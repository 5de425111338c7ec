//! Command implementations.
//!
//! Each command works against an opened [`LogEntryRepo`] and writes its
//! human-facing output to `out`.

use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

use camlog_core::display::{list_line, time_info};
use camlog_core::draft::LogDraft;
use camlog_core::error::CoreError;
use camlog_core::fields::Field;
use camlog_core::form_session::{FormSession, SubmitOutcome};
use camlog_core::log_entry::{now, LogEntry};
use camlog_core::report::{build_report, export_file_name, render_text, ExportOptions};
use camlog_core::selection::Selection;
use camlog_core::suggest::suggestions;
use camlog_core::types::local_wall_clock;
use camlog_core::validation::{validate, violations};
use camlog_db::{BlobStore, LogEntryRepo};

use crate::cli::{Assignment, Command};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

const ENTITY: &str = "log entry";

/// Run one parsed command.
pub async fn run<B, W>(
    command: Command,
    repo: &mut LogEntryRepo<B>,
    config: &AppConfig,
    out: &mut W,
) -> CliResult<()>
where
    B: BlobStore,
    W: Write,
{
    match command {
        Command::Add { set, circled } => {
            let mut session = FormSession::new(LogDraft::initial(local_wall_clock(now())));
            apply(&mut session, &set, circled.then_some(true));
            submit(session, repo, out).await
        }
        Command::Edit {
            id,
            set,
            circled,
            uncircled,
        } => {
            let entry = find(repo, &id)?.clone();
            let mut session = FormSession::edit(&entry);
            let flag = match (circled, uncircled) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            apply(&mut session, &set, flag);
            submit(session, repo, out).await
        }
        Command::List { json } => list(repo, json, out),
        Command::Show { id } => show(find(repo, &id)?, out),
        Command::Delete { id } => {
            if !repo.delete(&id).await? {
                return Err(not_found(&id));
            }
            writeln!(out, "Deleted {id}")?;
            Ok(())
        }
        Command::Clear { yes } => {
            if !yes {
                return Err(CliError::Usage(
                    "Refusing to delete every log without --yes".into(),
                ));
            }
            let removed = repo.clear_all().await?;
            writeln!(out, "Deleted {removed} camera log(s)")?;
            Ok(())
        }
        Command::Validate { field, value } => match validate(field, &value) {
            None => {
                writeln!(out, "{}: ok", field.label())?;
                Ok(())
            }
            Some(message) => Err(CliError::InvalidValue { field, message }),
        },
        Command::Suggest { field, input } => {
            for candidate in suggestions(field, &input, repo.list()) {
                writeln!(out, "{candidate}")?;
            }
            Ok(())
        }
        Command::Export {
            ids,
            title,
            production,
            no_notes,
            include_empty,
            no_group,
            out: path,
        } => {
            let defaults = ExportOptions::default();
            let options = ExportOptions {
                title: title.unwrap_or(defaults.title),
                production_name: production.unwrap_or_default(),
                include_notes: !no_notes,
                include_empty_fields: include_empty,
                group_by_date: !no_group,
            };
            export(repo.list(), &ids, &options, path, config, out).await
        }
    }
}

// ---------------------------------------------------------------------------
// Form commands
// ---------------------------------------------------------------------------

/// Feed assignments through the session as if typed and then left.
fn apply(session: &mut FormSession, set: &[Assignment], circled: Option<bool>) {
    for assignment in set {
        session.on_change(assignment.field, assignment.value.clone());
        session.on_blur(assignment.field);
    }
    if let Some(flag) = circled {
        session.on_change(Field::Circled, flag.to_string());
        session.on_blur(Field::Circled);
    }
}

async fn submit<B: BlobStore, W: Write>(
    mut session: FormSession,
    repo: &mut LogEntryRepo<B>,
    out: &mut W,
) -> CliResult<()> {
    match session.submit(repo).await {
        SubmitOutcome::Saved(entry) => {
            writeln!(out, "Saved {}", list_line(&entry, now(), &Local))?;
            Ok(())
        }
        SubmitOutcome::Invalid { errors, .. } => {
            for violation in violations(&errors) {
                writeln!(out, "  {}: {}", violation.field.label(), violation.message)?;
            }
            if let Some(message) = session.attention_message() {
                writeln!(out, "{message}")?;
            }
            Err(CliError::InvalidEntry {
                count: errors.len(),
            })
        }
        SubmitOutcome::SaveFailed { reason } => Err(CliError::SaveFailed(reason)),
        SubmitOutcome::Rejected => {
            Err(CoreError::Internal("form session already closed".into()).into())
        }
    }
}

// ---------------------------------------------------------------------------
// Browsing
// ---------------------------------------------------------------------------

fn list<B: BlobStore, W: Write>(repo: &LogEntryRepo<B>, json: bool, out: &mut W) -> CliResult<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, repo.list())?;
        writeln!(out)?;
        return Ok(());
    }
    if repo.is_empty() {
        writeln!(out, "No camera logs yet.")?;
        return Ok(());
    }
    let now = now();
    for entry in repo.list() {
        writeln!(out, "{}", list_line(entry, now, &Local))?;
    }
    Ok(())
}

fn show<W: Write>(entry: &LogEntry, out: &mut W) -> CliResult<()> {
    writeln!(out, "{}  [{}]", entry.headline(), time_info(entry, &Local))?;
    writeln!(out, "  {:<14} {}", "ID:", entry.id)?;
    for field in Field::ALL {
        if let Some(value) = entry.field_text(field) {
            writeln!(out, "  {:<14} {}", format!("{}:", field.label()), value)?;
        }
    }
    writeln!(
        out,
        "  {:<14} {}",
        "Created:",
        local_wall_clock(entry.created_at).format("%Y-%m-%d %H:%M")
    )?;
    if let Some(updated) = entry.updated_at {
        writeln!(
            out,
            "  {:<14} {}",
            "Updated:",
            local_wall_clock(updated).format("%Y-%m-%d %H:%M")
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

async fn export<W: Write>(
    entries: &[LogEntry],
    ids: &[String],
    options: &ExportOptions,
    path: Option<PathBuf>,
    config: &AppConfig,
    out: &mut W,
) -> CliResult<()> {
    let selection = if ids.is_empty() {
        Selection::all(entries)
    } else {
        let mut selection = Selection::new();
        for id in ids {
            if !entries.iter().any(|e| &e.id == id) {
                return Err(not_found(id));
            }
            if !selection.is_selected(id) {
                selection.toggle(id);
            }
        }
        selection
    };

    let chosen = selection.filter(entries);
    if chosen.is_empty() {
        return Err(CliError::Usage("No camera logs to export".into()));
    }

    let generated_at = now();
    let report = build_report(&chosen, options, generated_at, &Local)?;
    let text = render_text(&report);

    let path = path.unwrap_or_else(|| {
        config
            .export_dir
            .join(export_file_name(&options.title, local_wall_clock(generated_at).date()))
    });
    if path.as_os_str() == "-" {
        out.write_all(text.as_bytes())?;
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, text).await?;
    tracing::info!(path = %path.display(), count = chosen.len(), "Exported camera log report");
    writeln!(out, "Exported {} log(s) to {}", chosen.len(), path.display())?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn find<'a, B: BlobStore>(repo: &'a LogEntryRepo<B>, id: &str) -> CliResult<&'a LogEntry> {
    repo.find_by_id(id).ok_or_else(|| not_found(id))
}

fn not_found(id: &str) -> CliError {
    CoreError::NotFound {
        entity: ENTITY,
        id: id.to_string(),
    }
    .into()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
