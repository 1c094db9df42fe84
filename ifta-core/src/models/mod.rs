mod fuel_row;
mod report;

pub use fuel_row::{FuelRow, RowField, RowId, UnknownFieldError};
pub use report::{ApportionmentReport, ComputedRow, Totals};
