use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use ifta_cli::app;
use ifta_cli::logging::{self, LogOptions};
use ifta_cli::session::Session;
use ifta_data::ReportWriter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// IFTA fuel tax calculator.
///
/// Apportions fleet fuel consumption over jurisdictions by miles driven and
/// computes the net tax owed to (or credited by) each one.
#[derive(Debug, Parser)]
#[command(name = "ifta", version, about, long_about = None)]
struct Cli {
    /// TOML file listing the known jurisdictions.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `warn,ifta_core=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the report for a CSV of fuel rows.
    Report {
        /// CSV file with columns jurisdiction,miles,gallons,tax_rate
        #[arg(short, long)]
        file: PathBuf,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List the configured jurisdictions.
    Jurisdictions,

    /// Edit rows interactively, recomputing after every change.
    Session {
        /// Start from the rows in this CSV instead of a single blank row.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(&LogOptions {
        level: cli.log_level.clone(),
        file: cli.log_file.clone(),
    })?;

    let config = app::load_config(cli.config.as_deref())?;
    debug!(jurisdictions = config.jurisdictions.len(), "configuration ready");

    let stdout = io::stdout();
    match cli.command {
        Command::Report { file, format } => {
            let ledger = app::load_ledger(&file)?;
            app::warn_unknown_jurisdictions(&config, ledger.rows());
            let report = ledger.report();

            let mut out = stdout.lock();
            match format {
                OutputFormat::Table => write!(out, "{}", app::render_report(&report))?,
                OutputFormat::Csv => {
                    ReportWriter::write(&report, &mut out).context("Failed to write CSV report")?
                }
            }
            info!(rows = report.rows.len(), "report complete");
        }
        Command::Jurisdictions => {
            write!(stdout.lock(), "{}", app::render_jurisdictions(&config))?;
        }
        Command::Session { file } => {
            let mut session = match file {
                Some(path) => {
                    let ledger = app::load_ledger(&path)?;
                    app::warn_unknown_jurisdictions(&config, ledger.rows());
                    Session::with_ledger(config, ledger)
                }
                None => Session::new(config),
            };
            session.run(io::stdin().lock(), stdout.lock())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn report_defaults_to_table_format() {
        let cli = Cli::try_parse_from(["ifta", "report", "--file", "rows.csv"]).unwrap();

        match cli.command {
            Command::Report { file, format } => {
                assert_eq!(file, PathBuf::from("rows.csv"));
                assert_eq!(format, OutputFormat::Table);
            }
            other => panic!("expected report command, got {other:?}"),
        }
    }

    #[test]
    fn report_accepts_csv_format_and_global_flags() {
        let cli = Cli::try_parse_from([
            "ifta",
            "report",
            "-f",
            "rows.csv",
            "--format",
            "csv",
            "--config",
            "ifta.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("ifta.toml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(
            cli.command,
            Command::Report {
                format: OutputFormat::Csv,
                ..
            }
        ));
    }

    #[test]
    fn report_requires_a_file() {
        assert!(Cli::try_parse_from(["ifta", "report"]).is_err());
    }

    #[test]
    fn report_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["ifta", "report", "-f", "rows.csv", "--format", "json"]).is_err());
    }

    #[test]
    fn session_file_is_optional() {
        let cli = Cli::try_parse_from(["ifta", "session"]).unwrap();
        assert!(matches!(cli.command, Command::Session { file: None }));

        let cli = Cli::try_parse_from(["ifta", "--log-file", "ifta.log", "session", "-f", "rows.csv"])
            .unwrap();
        assert_eq!(cli.log_file, Some(PathBuf::from("ifta.log")));
        assert!(matches!(cli.command, Command::Session { file: Some(_) }));
    }
}
