//! CSV export of computed reports.
//!
//! Output mirrors the on-screen table: one line per row with the derived
//! values at two decimals, then a `Totals` line.
//!
//! ```csv
//! jurisdiction,miles,gallons,tax_rate,taxable,net
//! Texas,100,5,0.4,10.00,2.00
//! Ontario,100,15,0.4,10.00,-2.00
//! Totals,200,20,-,20.00,0.00
//! ```

use std::io::Write;

use ifta_core::ApportionmentReport;
use ifta_core::calculations::{format_amount, format_quantity};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct ReportRecord<'a> {
    jurisdiction: &'a str,
    miles: &'a str,
    gallons: &'a str,
    tax_rate: &'a str,
    taxable: String,
    net: String,
}

/// Writes [`ApportionmentReport`]s as CSV.
pub struct ReportWriter;

impl ReportWriter {
    pub fn write<W: Write>(
        report: &ApportionmentReport,
        writer: W,
    ) -> Result<(), ExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for computed in &report.rows {
            csv_writer.serialize(ReportRecord {
                jurisdiction: &computed.row.jurisdiction,
                miles: &computed.row.miles,
                gallons: &computed.row.gallons,
                tax_rate: &computed.row.tax_rate,
                taxable: format_amount(computed.taxable),
                net: format_amount(computed.net),
            })?;
        }

        let totals = &report.totals;
        let total_miles = format_quantity(totals.total_miles);
        let total_gallons = format_quantity(totals.total_gallons);
        let totals_record = ReportRecord {
            jurisdiction: "Totals",
            miles: &total_miles,
            gallons: &total_gallons,
            tax_rate: "-",
            taxable: format_amount(totals.total_taxable),
            net: format_amount(totals.total_net),
        };
        // The header comes from the first serialized record, so an empty
        // report still gets one here.
        csv_writer.serialize(totals_record)?;
        csv_writer.flush()?;

        debug!(rows = report.rows.len(), "exported report");
        Ok(())
    }

    pub fn to_string(report: &ApportionmentReport) -> Result<String, ExportError> {
        let mut buf = Vec::new();
        Self::write(report, &mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}
