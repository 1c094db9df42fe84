//! Interactive line-editing session over a [`FuelLedger`].
//!
//! Every command that changes the rows reprints the full report.

use std::io::{BufRead, Write};

use anyhow::Result;
use ifta_core::{FuelLedger, IftaConfig, LedgerError, RowField, RowId, UnknownFieldError};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{app, logging};

const PROMPT: &str = "ifta> ";

const HELP: &str = "\
Commands:
  add [jurisdiction]          append a blank row
  set <id> <field> [value]    replace one field (jurisdiction, miles, gallons, tax_rate)
  remove <id>                 drop a row
  show                        print the report
  jurisdictions               list configured jurisdictions
  log <filter>                change the log filter, e.g. 'debug'
  help                        print this help
  quit                        leave the session
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Set {
        id: RowId,
        field: RowField,
        value: String,
    },
    Remove(RowId),
    Show,
    Jurisdictions,
    Log(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid row id '{0}'")]
    InvalidId(String),

    #[error(transparent)]
    Field(#[from] UnknownFieldError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Splits off the first whitespace-delimited word.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

fn parse_id(token: &str) -> Result<RowId, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidId(token.to_string()))
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let (word, rest) = split_word(line);
        let rest = rest.trim_end();

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "add" => Self::Add(rest.to_string()),
            "set" => {
                let (id, rest) = split_word(rest);
                let (field, value) = split_word(rest);
                if id.is_empty() || field.is_empty() {
                    return Err(CommandError::Usage("set <id> <field> [value]"));
                }
                Self::Set {
                    id: parse_id(id)?,
                    field: field.parse()?,
                    value: value.to_string(),
                }
            }
            "remove" | "rm" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("remove <id>"));
                }
                Self::Remove(parse_id(rest)?)
            }
            "show" | "report" => Self::Show,
            "jurisdictions" => Self::Jurisdictions,
            "log" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("log <filter>"));
                }
                Self::Log(rest.to_string())
            }
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

pub struct Session {
    ledger: FuelLedger,
    config: IftaConfig,
}

impl Session {
    /// A session starting from a single blank row.
    pub fn new(config: IftaConfig) -> Self {
        Self::with_ledger(config, FuelLedger::with_blank_row())
    }

    pub fn with_ledger(
        config: IftaConfig,
        ledger: FuelLedger,
    ) -> Self {
        Self { ledger, config }
    }

    pub fn ledger(&self) -> &FuelLedger {
        &self.ledger
    }

    /// Applies a parsed command, writing any output to `out`.
    pub fn apply<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<Flow> {
        debug!(?command, "applying session command");
        match command {
            Command::Add(jurisdiction) => {
                let id = self.ledger.append(jurisdiction);
                self.check_jurisdiction(id);
                writeln!(out, "added row {id}")?;
                self.print_report(out)?;
            }
            Command::Set { id, field, value } => {
                if let Err(e) = self.ledger.update_field(id, field, value) {
                    return self.report_error(CommandError::from(e), out);
                }
                if field == RowField::Jurisdiction {
                    self.check_jurisdiction(id);
                }
                self.print_report(out)?;
            }
            Command::Remove(id) => {
                if let Err(e) = self.ledger.remove(id) {
                    return self.report_error(CommandError::from(e), out);
                }
                writeln!(out, "removed row {id}")?;
                self.print_report(out)?;
            }
            Command::Show => self.print_report(out)?,
            Command::Jurisdictions => write!(out, "{}", app::render_jurisdictions(&self.config))?,
            Command::Log(filter) => match logging::set_log_level(&filter) {
                Ok(()) => writeln!(out, "log filter set to '{filter}'")?,
                Err(e) => writeln!(out, "error: {e}")?,
            },
            Command::Help => write!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Parses and applies one line of input.
    pub fn execute<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
    ) -> Result<Flow> {
        match Command::parse(line) {
            Ok(Some(command)) => self.apply(command, out),
            Ok(None) => Ok(Flow::Continue),
            Err(e) => self.report_error(e, out),
        }
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut out: W,
    ) -> Result<()> {
        self.print_report(&mut out)?;
        write!(out, "{PROMPT}")?;
        out.flush()?;

        for line in input.lines() {
            if self.execute(&line?, &mut out)? == Flow::Quit {
                return Ok(());
            }
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn print_report<W: Write>(
        &self,
        out: &mut W,
    ) -> Result<()> {
        write!(out, "{}", app::render_report(&self.ledger.report()))?;
        Ok(())
    }

    fn check_jurisdiction(
        &self,
        id: RowId,
    ) {
        if let Some(row) = self.ledger.get(id) {
            app::warn_unknown_jurisdictions(&self.config, std::slice::from_ref(row));
        }
    }

    fn report_error<W: Write>(
        &self,
        error: CommandError,
        out: &mut W,
    ) -> Result<Flow> {
        if let CommandError::Unknown(word) = &error {
            warn!(command = %word, "unknown session command");
        }
        writeln!(out, "error: {error}")?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run_script(script: &str) -> (Session, String) {
        let mut session = Session::new(IftaConfig::default());
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    // =========================================================================
    // Command::parse tests
    // =========================================================================

    #[test]
    fn parse_blank_line_is_none() {
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn parse_add_keeps_multi_word_jurisdiction() {
        assert_eq!(
            Command::parse("add New Mexico"),
            Ok(Some(Command::Add("New Mexico".to_string())))
        );
        assert_eq!(Command::parse("add"), Ok(Some(Command::Add(String::new()))));
    }

    #[test]
    fn parse_set_splits_id_field_and_value() {
        assert_eq!(
            Command::parse("set 3 jurisdiction  British Columbia "),
            Ok(Some(Command::Set {
                id: RowId(3),
                field: RowField::Jurisdiction,
                value: "British Columbia".to_string(),
            }))
        );
    }

    #[test]
    fn parse_set_without_value_clears_field() {
        assert_eq!(
            Command::parse("SET 1 taxRate"),
            Ok(Some(Command::Set {
                id: RowId(1),
                field: RowField::TaxRate,
                value: String::new(),
            }))
        );
    }

    #[test]
    fn parse_set_reports_bad_arguments() {
        assert_eq!(
            Command::parse("set 1"),
            Err(CommandError::Usage("set <id> <field> [value]"))
        );
        assert_eq!(
            Command::parse("set x miles 5"),
            Err(CommandError::InvalidId("x".to_string()))
        );
        assert_eq!(
            Command::parse("set 1 odometer 5"),
            Err(CommandError::Field(UnknownFieldError("odometer".to_string())))
        );
    }

    #[test]
    fn parse_remove_and_aliases() {
        assert_eq!(Command::parse("rm 2"), Ok(Some(Command::Remove(RowId(2)))));
        assert_eq!(Command::parse("remove"), Err(CommandError::Usage("remove <id>")));
        assert_eq!(Command::parse("exit"), Ok(Some(Command::Quit)));
        assert_eq!(Command::parse("?"), Ok(Some(Command::Help)));
    }

    #[test]
    fn parse_unknown_command() {
        assert_eq!(
            Command::parse("launch rockets"),
            Err(CommandError::Unknown("launch".to_string()))
        );
    }

    // =========================================================================
    // Session tests
    // =========================================================================

    #[test]
    fn session_starts_with_one_blank_row() {
        let session = Session::new(IftaConfig::default());

        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.ledger().rows()[0].miles, "");
    }

    #[test]
    fn session_edits_flow_into_report() {
        let (session, output) = run_script(
            "set 1 jurisdiction Texas\n\
             set 1 miles 100\n\
             set 1 gallons 5\n\
             set 1 tax_rate 0.4\n\
             add Ontario\n\
             set 2 miles 100\n\
             set 2 gallons 15\n\
             set 2 tax_rate 0.4\n\
             quit\n",
        );

        let report = session.ledger().report();
        assert_eq!(report.totals.fleet_mpg, 10.0);
        assert_eq!(report.rows[0].net, 2.0);
        assert_eq!(report.rows[1].net, -2.0);
        assert!(output.contains("added row 2"));
        assert!(output.contains("Fleet MPG: 10.00"));
    }

    #[test]
    fn session_remove_drops_row() {
        let (session, output) = run_script("add Texas\nremove 1\nquit\n");

        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.ledger().rows()[0].jurisdiction, "Texas");
        assert!(output.contains("removed row 1"));
    }

    #[test]
    fn session_reports_errors_and_continues() {
        let (session, output) = run_script("remove 9\nfly\nset 1 miles 40\n");

        assert!(output.contains("error: no row with id 9"));
        assert!(output.contains("error: unknown command 'fly'"));
        assert_eq!(session.ledger().rows()[0].miles, "40");
    }

    #[test]
    fn session_stops_at_quit() {
        let (session, _) = run_script("quit\nadd Texas\n");

        assert_eq!(session.ledger().len(), 1);
    }

    #[test]
    fn session_lists_jurisdictions_and_help() {
        let (_, output) = run_script("jurisdictions\nhelp\n");

        assert!(output.contains("Alabama\nCalifornia\nTexas\nOntario\n"));
        assert!(output.contains("Commands:"));
    }

    #[test]
    fn session_log_without_logging_reports_error() {
        let (_, output) = run_script("log debug\n");

        assert!(output.contains("error: logging not yet initialized"));
    }
}
