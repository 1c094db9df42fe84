//! Fleet-wide fuel tax apportionment.
//!
//! Fuel bought in one jurisdiction is usually burned in others. Apportionment
//! spreads the fleet's consumption over jurisdictions by miles driven there:
//!
//! | Value           | Formula                                           |
//! |-----------------|---------------------------------------------------|
//! | `total_miles`   | sum of every row's miles                          |
//! | `total_gallons` | sum of every row's gallons purchased              |
//! | `fleet_mpg`     | `total_miles / total_gallons`, or 0 if no gallons |
//! | `taxable`       | `miles / fleet_mpg`, or 0 if `fleet_mpg` is 0     |
//! | `net`           | `(taxable - gallons) * tax_rate`                  |
//!
//! A positive `net` is tax owed to the jurisdiction; a negative one is a
//! credit for fuel purchased there but burned elsewhere.
//!
//! # Example
//!
//! ```
//! use ifta_core::calculations::apportion;
//! use ifta_core::{FuelRow, RowId};
//!
//! let rows = vec![
//!     FuelRow {
//!         id: RowId(1),
//!         jurisdiction: "Texas".to_string(),
//!         miles: "100".to_string(),
//!         gallons: "5".to_string(),
//!         tax_rate: "0.4".to_string(),
//!     },
//!     FuelRow {
//!         id: RowId(2),
//!         jurisdiction: "Ontario".to_string(),
//!         miles: "100".to_string(),
//!         gallons: "15".to_string(),
//!         tax_rate: "0.4".to_string(),
//!     },
//! ];
//!
//! let report = apportion(&rows);
//!
//! assert_eq!(report.totals.fleet_mpg, 10.0);
//! assert_eq!(report.rows[0].net, 2.0);
//! assert_eq!(report.rows[1].net, -2.0);
//! assert_eq!(report.totals.total_net, 0.0);
//! ```

use tracing::debug;

use super::numeric::{Numeric, coerce};
use crate::models::{ApportionmentReport, ComputedRow, FuelRow, Totals};

/// Computes the full report for an ordered sequence of rows.
///
/// Pure: the rows are not modified and identical input always yields a
/// bit-identical report. Sums are accumulated in row order. Every derived
/// value that overflows to infinity or NaN is reported as 0.
pub fn apportion(rows: &[FuelRow]) -> ApportionmentReport {
    let total_miles = finite_sum(rows.iter().map(|r| coerce(&r.miles)));
    let total_gallons = finite_sum(rows.iter().map(|r| coerce(&r.gallons)));
    let fleet_mpg = fleet_mpg(total_miles, total_gallons);

    let computed: Vec<ComputedRow> = rows
        .iter()
        .map(|row| compute_row(row, fleet_mpg))
        .collect();

    let total_taxable = finite_sum(computed.iter().map(|r| r.taxable));
    let total_net = finite_sum(computed.iter().map(|r| r.net));

    debug!(
        rows = rows.len(),
        total_miles, total_gallons, fleet_mpg, total_taxable, total_net, "apportioned fleet"
    );

    ApportionmentReport {
        totals: Totals {
            total_miles,
            total_gallons,
            fleet_mpg,
            total_taxable,
            total_net,
        },
        rows: computed,
    }
}

/// Fleet average fuel economy, or 0 when no fuel was purchased.
pub fn fleet_mpg(
    total_miles: f64,
    total_gallons: f64,
) -> f64 {
    if total_gallons > 0.0 {
        (total_miles / total_gallons).to_numeric()
    } else {
        0.0
    }
}

/// Gallons attributable to `miles` at the given fleet economy.
pub fn taxable_gallons(
    miles: f64,
    fleet_mpg: f64,
) -> f64 {
    if fleet_mpg > 0.0 {
        (miles / fleet_mpg).to_numeric()
    } else {
        0.0
    }
}

/// Tax owed on fuel consumed beyond what was purchased; negative is a credit.
pub fn net_tax(
    taxable: f64,
    gallons: f64,
    tax_rate: f64,
) -> f64 {
    ((taxable - gallons) * tax_rate).to_numeric()
}

fn finite_sum(values: impl Iterator<Item = f64>) -> f64 {
    values.sum::<f64>().to_numeric()
}

fn compute_row(
    row: &FuelRow,
    fleet_mpg: f64,
) -> ComputedRow {
    let miles = coerce(&row.miles);
    let gallons = coerce(&row.gallons);
    let tax_rate = coerce(&row.tax_rate);

    let taxable = taxable_gallons(miles, fleet_mpg);
    let net = net_tax(taxable, gallons, tax_rate);

    ComputedRow {
        row: row.clone(),
        taxable,
        net,
    }
}
