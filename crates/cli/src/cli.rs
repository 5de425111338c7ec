use std::path::PathBuf;

use camlog_core::fields::Field;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "camlog")]
#[command(about = "Camera log book for recording takes on set", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new take.
    Add {
        /// Field assignment, repeatable (e.g. `--set camera=A-Cam --set roll=1`).
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<Assignment>,
        /// Mark the take as circled.
        #[arg(long)]
        circled: bool,
    },

    /// Change fields of an existing take.
    Edit {
        id: String,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<Assignment>,
        #[arg(long, conflicts_with = "uncircled")]
        circled: bool,
        #[arg(long)]
        uncircled: bool,
    },

    /// List all takes, oldest first.
    List {
        /// Output the raw entries as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show every recorded field of one take.
    Show { id: String },

    /// Delete one take.
    Delete { id: String },

    /// Delete every take.
    Clear {
        /// Confirm deletion.
        #[arg(long)]
        yes: bool,
    },

    /// Check a single field value without saving anything.
    Validate {
        #[arg(value_parser = parse_field)]
        field: Field,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Suggest values for a field from recent takes and presets.
    Suggest {
        #[arg(value_parser = parse_field)]
        field: Field,
        #[arg(default_value = "")]
        input: String,
    },

    /// Write a text report of the selected takes.
    Export {
        /// Take to include, repeatable. Defaults to all takes.
        #[arg(long = "id", value_name = "ID")]
        ids: Vec<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        production: Option<String>,
        /// Leave notes out of the report.
        #[arg(long)]
        no_notes: bool,
        /// Print empty fields as a placeholder.
        #[arg(long)]
        include_empty: bool,
        /// One flat list instead of per-day sections.
        #[arg(long)]
        no_group: bool,
        /// Output file; `-` writes to stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// One `--set FIELD=VALUE` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub field: Field,
    pub value: String,
}

/// Parse a field by its key (`fStop`) or, case-insensitively, its label (`F-Stop`).
pub fn parse_field(raw: &str) -> Result<Field, String> {
    let raw = raw.trim();
    Field::from_key(raw)
        .or_else(|| {
            Field::ALL
                .into_iter()
                .find(|f| f.key().eq_ignore_ascii_case(raw) || f.label().eq_ignore_ascii_case(raw))
        })
        .ok_or_else(|| {
            let keys: Vec<_> = Field::ALL.iter().map(|f| f.key()).collect();
            format!("unknown field `{raw}` (expected one of: {})", keys.join(", "))
        })
}

pub fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{raw}`"))?;
    Ok(Assignment {
        field: parse_field(field)?,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_add_with_assignments() {
        let cli = Cli::try_parse_from([
            "camlog",
            "add",
            "--set",
            "camera=A-Cam",
            "--set",
            "F-Stop=f/2.8",
            "--set",
            "notes=a=b",
            "--circled",
        ])
        .unwrap();
        let (set, circled) = assert_matches!(cli.command, Command::Add { set, circled } => (set, circled));
        assert!(circled);
        assert_eq!(set[0], Assignment { field: Field::Camera, value: "A-Cam".into() });
        assert_eq!(set[1].field, Field::FStop);
        assert_eq!(set[2].value, "a=b");
    }

    #[test]
    fn rejects_unknown_field() {
        assert!(Cli::try_parse_from(["camlog", "add", "--set", "colour=red"]).is_err());
        assert!(Cli::try_parse_from(["camlog", "add", "--set", "camera"]).is_err());
    }

    #[test]
    fn circled_flags_conflict() {
        assert!(Cli::try_parse_from(["camlog", "edit", "x", "--circled", "--uncircled"]).is_err());
    }

    #[test]
    fn validate_accepts_negative_values() {
        let cli = Cli::try_parse_from(["camlog", "validate", "roll", "-3"]).unwrap();
        assert_matches!(cli.command, Command::Validate { field: Field::Roll, value } if value == "-3");
    }

    #[test]
    fn export_flags() {
        let cli = Cli::try_parse_from([
            "camlog", "export", "--id", "a", "--id", "b", "--no-notes", "--out", "-",
        ])
        .unwrap();
        assert_matches!(
            cli.command,
            Command::Export { ids, no_notes: true, no_group: false, out: Some(_), .. } if ids == ["a", "b"]
        );
    }
}
