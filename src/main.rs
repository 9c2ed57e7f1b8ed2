//! Binary entry point for cpr-redact.
//!
//! Redacts CPR numbers from a file or stdin.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI diagnostics
#![allow(clippy::print_stderr)]

use clap::{Parser, Subcommand};
use cpr_redact::observability::{self, InitOptions};
use cpr_redact::{AppConfig, Error, FilterConfig, RedactionSummary, Redactor};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// cpr-redact - Redact Danish CPR numbers from text.
#[derive(Parser)]
#[command(name = "cpr-redact")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "CPR_REDACT_CONFIG")]
    config: Option<PathBuf>,

    /// Placeholder text for redacted numbers.
    #[arg(long, global = true)]
    placeholder: Option<String>,

    /// Disable the modulus 11 check.
    #[arg(long, global = true)]
    no_checksum: bool,

    /// Disable the birth-date check.
    #[arg(long, global = true)]
    no_date_check: bool,

    /// Do not redact every dashed number unconditionally.
    #[arg(long, global = true)]
    no_dash: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Redact a file (or stdin) and write the result.
    Redact {
        /// Input file; reads stdin when omitted.
        input: Option<PathBuf>,

        /// Output file; writes stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report what would be redacted without changing anything.
    ///
    /// Exits with status 1 when the input contains redactable numbers.
    Check {
        /// Input file; reads stdin when omitted.
        input: Option<PathBuf>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the effective filter configuration as TOML.
    Config,
}

/// Report printed by `check`.
#[derive(Serialize)]
struct CheckReport {
    candidates: usize,
    approved: usize,
    occurrences: usize,
}

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::from(2);
        },
    };

    if let Err(e) = observability::init_from_config(
        &config.logging,
        InitOptions {
            verbose: cli.verbose,
        },
    ) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::from(2);
    }

    match run_command(cli.command, &config.filter) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        },
    }
}

/// Loads the config file (or defaults) and applies command-line overrides.
fn load_config(cli: &Cli) -> cpr_redact::Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_default(),
    };

    let filter = apply_overrides(config.filter.clone(), cli)?;
    Ok(config.with_filter(filter))
}

/// Folds the command-line flags onto `filter` and validates the result.
fn apply_overrides(mut filter: FilterConfig, cli: &Cli) -> cpr_redact::Result<FilterConfig> {
    if let Some(placeholder) = &cli.placeholder {
        filter = filter.with_placeholder(placeholder.clone());
    }
    if cli.no_checksum {
        filter = filter.without_checksum();
    }
    if cli.no_date_check {
        filter = filter.without_date_check();
    }
    if cli.no_dash {
        filter = filter.without_dash_blanket();
    }
    filter.validate()?;
    Ok(filter)
}

/// Exit status of `check`: 1 when anything would be redacted.
fn check_status(summary: &RedactionSummary) -> u8 {
    u8::from(summary.changed())
}

/// Runs the selected command.
fn run_command(command: Commands, filter: &FilterConfig) -> cpr_redact::Result<ExitCode> {
    match command {
        Commands::Redact { input, output } => {
            let text = read_input(input.as_deref())?;
            let redacted = Redactor::with_config(filter.clone()).redact(&text);
            write_output(output.as_deref(), &redacted)?;
            Ok(ExitCode::SUCCESS)
        },
        Commands::Check { input, json } => {
            let text = read_input(input.as_deref())?;
            let summary = Redactor::with_config(filter.clone())
                .redact_with_outcome(&text)
                .summary;
            let report = CheckReport {
                candidates: summary.candidates,
                approved: summary.approved,
                occurrences: summary.replaced,
            };

            let rendered = if json {
                serde_json::to_string(&report).map_err(|e| cli_error("render_report", e))?
            } else {
                format!(
                    "candidates: {}\napproved: {}\noccurrences: {}",
                    report.candidates, report.approved, report.occurrences
                )
            };
            write_output(None, &format!("{rendered}\n"))?;

            Ok(ExitCode::from(check_status(&summary)))
        },
        Commands::Config => {
            let rendered = toml::to_string(&ConfigView { filter })
                .map_err(|e| cli_error("render_config", e))?;
            write_output(None, &rendered)?;
            Ok(ExitCode::SUCCESS)
        },
    }
}

/// Wrapper so the filter settings print under a `[filter]` table.
#[derive(Serialize)]
struct ConfigView<'a> {
    filter: &'a FilterConfig,
}

fn read_input(path: Option<&Path>) -> cpr_redact::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| cli_error("read_input", e)),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| cli_error("read_stdin", e))?;
            Ok(text)
        },
    }
}

fn write_output(path: Option<&Path>, text: &str) -> cpr_redact::Result<()> {
    match path {
        Some(path) => std::fs::write(path, text).map_err(|e| cli_error("write_output", e)),
        None => write_stream(&mut std::io::stdout().lock(), text),
    }
}

fn write_stream(stream: &mut impl Write, text: &str) -> cpr_redact::Result<()> {
    stream
        .write_all(text.as_bytes())
        .and_then(|()| stream.flush())
        .map_err(|e| cli_error("write_stdout", e))
}

#[allow(clippy::needless_pass_by_value)]
fn cli_error(operation: &str, e: impl std::fmt::Display) -> Error {
    Error::OperationFailed {
        operation: operation.to_string(),
        cause: e.to_string(),
    }
}
