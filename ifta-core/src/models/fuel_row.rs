use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a row within a [`FuelLedger`](crate::FuelLedger).
///
/// Ids are handed out by the ledger from a monotonic counter and are never
/// reused, even after the row they named has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RowId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RowId)
    }
}

/// One jurisdiction's reporting entry, exactly as the user typed it.
///
/// Numeric fields stay as raw text; they are only coerced to numbers when a
/// report is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelRow {
    pub id: RowId,
    pub jurisdiction: String,
    pub miles: String,
    pub gallons: String,
    pub tax_rate: String,
}

impl FuelRow {
    /// A fully populated row with empty numeric fields.
    pub fn blank(
        id: RowId,
        jurisdiction: impl Into<String>,
    ) -> Self {
        Self {
            id,
            jurisdiction: jurisdiction.into(),
            miles: String::new(),
            gallons: String::new(),
            tax_rate: String::new(),
        }
    }

    /// Returns a copy of this row with one field replaced.
    pub fn with_field(
        &self,
        field: RowField,
        value: impl Into<String>,
    ) -> Self {
        let value = value.into();
        let mut row = self.clone();
        match field {
            RowField::Jurisdiction => row.jurisdiction = value,
            RowField::Miles => row.miles = value,
            RowField::Gallons => row.gallons = value,
            RowField::TaxRate => row.tax_rate = value,
        }
        row
    }
}

/// The editable fields of a [`FuelRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowField {
    Jurisdiction,
    Miles,
    Gallons,
    TaxRate,
}

/// Error returned when a field name does not match any [`RowField`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field '{0}' (expected jurisdiction, miles, gallons or tax_rate)")]
pub struct UnknownFieldError(pub String);

impl RowField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jurisdiction => "jurisdiction",
            Self::Miles => "miles",
            Self::Gallons => "gallons",
            Self::TaxRate => "tax_rate",
        }
    }

    /// Case-insensitive lookup. Accepts `taxRate` and `rate` as aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jurisdiction" => Some(Self::Jurisdiction),
            "miles" => Some(Self::Miles),
            "gallons" => Some(Self::Gallons),
            "tax_rate" | "taxrate" | "rate" => Some(Self::TaxRate),
            _ => None,
        }
    }
}

impl FromStr for RowField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

impl fmt::Display for RowField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
