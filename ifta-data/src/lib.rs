//! CSV import and export for fuel tax reports.

pub mod export;
pub mod loader;

pub use export::{ExportError, ReportWriter};
pub use loader::{CsvLoadError, FuelRowLoader, FuelRowRecord};
