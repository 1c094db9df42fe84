//! Report loading and plain-text rendering shared by the CLI commands.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use ifta_core::calculations::{format_amount, format_quantity};
use ifta_core::{ApportionmentReport, FuelLedger, FuelRow, IftaConfig};
use ifta_data::FuelRowLoader;
use tracing::{info, warn};

const HEADERS: [&str; 7] = [
    "Id",
    "Jurisdiction",
    "Miles",
    "Gallons",
    "Tax Rate",
    "Taxable",
    "Net Tax",
];

/// Column 1 (jurisdiction) is left-aligned, everything else right-aligned.
const LEFT_ALIGNED: usize = 1;

/// Loads the configuration file, or the built-in defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<IftaConfig> {
    match path {
        Some(path) => IftaConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(IftaConfig::default()),
    }
}

/// Reads a fuel rows CSV into a fresh ledger.
pub fn load_ledger(path: &Path) -> Result<FuelLedger> {
    let entries = FuelRowLoader::load_from_file(path)
        .with_context(|| format!("Failed to load rows: {}", path.display()))?;
    info!(rows = entries.len(), file = %path.display(), "loaded fuel rows");
    Ok(FuelLedger::from_entries(entries))
}

/// Logs a warning for every row whose jurisdiction is not in the configured
/// list. Rows are never rejected. Returns how many rows were flagged.
pub fn warn_unknown_jurisdictions(
    config: &IftaConfig,
    rows: &[FuelRow],
) -> usize {
    rows.iter()
        .filter(|row| !row.jurisdiction.is_empty() && !config.is_known(&row.jurisdiction))
        .inspect(|row| {
            warn!(id = %row.id, jurisdiction = %row.jurisdiction, "unknown jurisdiction");
        })
        .count()
}

/// Renders a report as an aligned text table followed by the fleet MPG.
///
/// Derived values are shown at two decimals; the miles and gallons totals
/// are shown as summed.
pub fn render_report(report: &ApportionmentReport) -> String {
    let mut lines: Vec<[String; 7]> = Vec::with_capacity(report.rows.len() + 2);
    lines.push(HEADERS.map(String::from));

    for computed in &report.rows {
        let row = &computed.row;
        lines.push([
            row.id.to_string(),
            row.jurisdiction.clone(),
            row.miles.clone(),
            row.gallons.clone(),
            row.tax_rate.clone(),
            format_amount(computed.taxable),
            format_amount(computed.net),
        ]);
    }

    let totals = &report.totals;
    lines.push([
        String::new(),
        "Totals".to_string(),
        format_quantity(totals.total_miles),
        format_quantity(totals.total_gallons),
        "-".to_string(),
        format_amount(totals.total_taxable),
        format_amount(totals.total_net),
    ]);

    let mut widths = [0usize; 7];
    for line in &lines {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for line in &lines {
        let cells: Vec<String> = line
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(col, (cell, width))| {
                if col == LEFT_ALIGNED {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Fleet MPG: {}", format_amount(totals.fleet_mpg));
    out
}

/// One configured jurisdiction per line.
pub fn render_jurisdictions(config: &IftaConfig) -> String {
    config
        .jurisdictions
        .iter()
        .map(|j| format!("{j}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use ifta_core::{RowEntry, RowField};
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(
        jurisdiction: &str,
        miles: &str,
        gallons: &str,
        tax_rate: &str,
    ) -> RowEntry {
        RowEntry {
            jurisdiction: jurisdiction.to_string(),
            miles: miles.to_string(),
            gallons: gallons.to_string(),
            tax_rate: tax_rate.to_string(),
        }
    }

    #[test]
    fn render_report_aligns_rows_and_totals() {
        let ledger = FuelLedger::from_entries(vec![
            entry("Texas", "100", "5", "0.4"),
            entry("Ontario", "100", "15", "0.4"),
        ]);

        let table = render_report(&ledger.report());

        assert_eq!(
            table,
            "\
Id  Jurisdiction  Miles  Gallons  Tax Rate  Taxable  Net Tax
 1  Texas           100        5       0.4    10.00     2.00
 2  Ontario         100       15       0.4    10.00    -2.00
    Totals          200       20         -    20.00     0.00

Fleet MPG: 10.00
"
        );
    }

    #[test]
    fn render_report_for_empty_fleet() {
        let table = render_report(&ApportionmentReport::default());

        assert_eq!(
            table,
            "\
Id  Jurisdiction  Miles  Gallons  Tax Rate  Taxable  Net Tax
    Totals            0        0         -     0.00     0.00

Fleet MPG: 0.00
"
        );
    }

    #[test]
    fn render_report_shows_fleet_mpg_at_two_decimals() {
        let ledger = FuelLedger::from_entries(vec![entry("Alabama", "100", "3", "0.29")]);

        let table = render_report(&ledger.report());

        assert!(table.ends_with("Fleet MPG: 33.33\n"));
    }

    #[test]
    fn warn_unknown_jurisdictions_counts_unlisted_names() {
        let mut ledger = FuelLedger::from_entries(vec![
            entry("Texas", "", "", ""),
            entry("Atlantis", "", "", ""),
            entry("", "", "", ""),
        ]);
        let last = ledger.rows()[2].id;
        ledger
            .update_field(last, RowField::Jurisdiction, "texas")
            .unwrap();

        let flagged = warn_unknown_jurisdictions(&IftaConfig::default(), ledger.rows());

        assert_eq!(flagged, 2);
    }

    #[test]
    fn render_jurisdictions_lists_one_per_line() {
        let text = render_jurisdictions(&IftaConfig::default());

        assert_eq!(text, "Alabama\nCalifornia\nTexas\nOntario\n");
    }

    #[test]
    fn load_config_without_path_uses_defaults() {
        let config = load_config(None).unwrap();

        assert_eq!(config, IftaConfig::default());
    }

    #[test]
    fn load_ledger_reports_missing_file() {
        let err = load_ledger(Path::new("missing/rows.csv")).unwrap_err();

        assert!(err.to_string().contains("missing/rows.csv"));
    }
}
