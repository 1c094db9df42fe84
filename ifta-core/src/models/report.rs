use serde::{Deserialize, Serialize};

use super::FuelRow;

/// A [`FuelRow`] together with the values derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedRow {
    #[serde(flatten)]
    pub row: FuelRow,
    /// Gallons the jurisdiction is deemed to have burned at fleet MPG.
    pub taxable: f64,
    /// Tax owed; negative values are a credit.
    pub net: f64,
}

/// Fleet-wide aggregates over every row of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_miles: f64,
    pub total_gallons: f64,
    pub fleet_mpg: f64,
    pub total_taxable: f64,
    pub total_net: f64,
}

/// The complete output of an apportionment run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApportionmentReport {
    #[serde(flatten)]
    pub totals: Totals,
    pub rows: Vec<ComputedRow>,
}
