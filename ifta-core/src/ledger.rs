//! In-memory row collection for an editing session.
//!
//! The ledger owns the ordered rows and the id counter. Rows change only by
//! whole-row replacement through [`FuelRow::with_field`], so a reader never
//! observes a half-edited row.

use thiserror::Error;
use tracing::debug;

use crate::calculations::apportion;
use crate::models::{ApportionmentReport, FuelRow, RowField, RowId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("no row with id {0}")]
    RowNotFound(RowId),
}

/// Raw text for one row, before the ledger assigns it an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowEntry {
    pub jurisdiction: String,
    pub miles: String,
    pub gallons: String,
    pub tax_rate: String,
}

#[derive(Debug, Clone, Default)]
pub struct FuelLedger {
    rows: Vec<FuelRow>,
    next_id: u64,
}

impl FuelLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger holding a single blank row, the state a fresh session starts in.
    pub fn with_blank_row() -> Self {
        let mut ledger = Self::new();
        ledger.append("");
        ledger
    }

    /// Builds a ledger from imported rows, assigning ids in order.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = RowEntry>,
    {
        let mut ledger = Self::new();
        for entry in entries {
            let id = ledger.allocate_id();
            ledger.rows.push(FuelRow {
                id,
                jurisdiction: entry.jurisdiction,
                miles: entry.miles,
                gallons: entry.gallons,
                tax_rate: entry.tax_rate,
            });
        }
        ledger
    }

    /// Appends a blank row and returns its id.
    pub fn append(
        &mut self,
        jurisdiction: impl Into<String>,
    ) -> RowId {
        let id = self.allocate_id();
        let row = FuelRow::blank(id, jurisdiction);
        debug!(%id, jurisdiction = %row.jurisdiction, "appended row");
        self.rows.push(row);
        id
    }

    /// Replaces one field of the row with the given id.
    pub fn update_field(
        &mut self,
        id: RowId,
        field: RowField,
        value: impl Into<String>,
    ) -> Result<(), LedgerError> {
        let slot = self
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(LedgerError::RowNotFound(id))?;

        let value = value.into();
        debug!(%id, %field, value = %value, "updated row field");
        *slot = slot.with_field(field, value);
        Ok(())
    }

    /// Removes the row with the given id, keeping the others in order.
    pub fn remove(
        &mut self,
        id: RowId,
    ) -> Result<FuelRow, LedgerError> {
        let index = self
            .rows
            .iter()
            .position(|r| r.id == id)
            .ok_or(LedgerError::RowNotFound(id))?;

        debug!(%id, "removed row");
        Ok(self.rows.remove(index))
    }

    pub fn get(
        &self,
        id: RowId,
    ) -> Option<&FuelRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn rows(&self) -> &[FuelRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Computes a fresh report over the current rows.
    pub fn report(&self) -> ApportionmentReport {
        apportion(&self.rows)
    }

    fn allocate_id(&mut self) -> RowId {
        self.next_id += 1;
        RowId(self.next_id)
    }
}
