//! CSV loader for per-jurisdiction fuel rows.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Every
//! column must be present in the header; individual cells may be empty.
//!
//! | Column         | Notes                                    |
//! |----------------|------------------------------------------|
//! | `jurisdiction` | Free text, not validated                 |
//! | `miles`        | Miles driven in the jurisdiction         |
//! | `gallons`      | Gallons purchased in the jurisdiction    |
//! | `tax_rate`     | Rate per gallon (`taxRate` also accepted) |
//!
//! Cells are kept as raw text. Non-numeric values are not an error here;
//! they coerce to zero when the report is computed.
//!
//! ```csv
//! jurisdiction,miles,gallons,tax_rate
//! Texas,100,5,0.4
//! Ontario,100,15,0.4
//! ```

use std::io::Read;
use std::path::Path;

use ifta_core::RowEntry;
use thiserror::Error;
use tracing::debug;

const REQUIRED_COLUMNS: [(&str, Option<&str>); 4] = [
    ("jurisdiction", None),
    ("miles", None),
    ("gallons", None),
    ("tax_rate", Some("taxRate")),
];

/// Errors that can occur when loading fuel row data.
#[derive(Debug, Error)]
pub enum CsvLoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error on row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("CSV header is missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// A single record from the fuel rows CSV file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuelRowRecord {
    pub jurisdiction: String,
    pub miles: String,
    pub gallons: String,
    pub tax_rate: String,
}

impl From<FuelRowRecord> for RowEntry {
    fn from(record: FuelRowRecord) -> Self {
        RowEntry {
            jurisdiction: record.jurisdiction,
            miles: record.miles,
            gallons: record.gallons,
            tax_rate: record.tax_rate,
        }
    }
}

/// Header positions of the required columns.
struct ColumnIndex {
    jurisdiction: usize,
    miles: usize,
    gallons: usize,
    tax_rate: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, CsvLoadError> {
        let find = |(name, alias): (&'static str, Option<&str>)| {
            headers
                .iter()
                .position(|h| h == name || alias.is_some_and(|a| h == a))
                .ok_or(CsvLoadError::MissingColumn(name))
        };
        let [jurisdiction, miles, gallons, tax_rate] = REQUIRED_COLUMNS;

        Ok(Self {
            jurisdiction: find(jurisdiction)?,
            miles: find(miles)?,
            gallons: find(gallons)?,
            tax_rate: find(tax_rate)?,
        })
    }

    /// Cells past the end of a short record read as empty.
    fn record(
        &self,
        raw: &csv::StringRecord,
    ) -> FuelRowRecord {
        let cell = |idx: usize| raw.get(idx).unwrap_or_default().to_string();
        FuelRowRecord {
            jurisdiction: cell(self.jurisdiction),
            miles: cell(self.miles),
            gallons: cell(self.gallons),
            tax_rate: cell(self.tax_rate),
        }
    }
}

/// Loader for fuel rows from CSV files.
pub struct FuelRowLoader;

impl FuelRowLoader {
    /// Parse fuel row records from a CSV reader, in file order.
    ///
    /// Short records are accepted; their missing trailing cells are empty.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<FuelRowRecord>, CsvLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|source| CsvLoadError::Parse { row: 0, source })?
            .clone();
        let columns = ColumnIndex::from_headers(&headers)?;

        let records = csv_reader
            .records()
            .enumerate()
            .map(|(idx, result)| {
                // 1-based, header is row 0
                result
                    .map(|raw| columns.record(&raw))
                    .map_err(|source| CsvLoadError::Parse {
                        row: idx + 1,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(records = records.len(), "parsed fuel rows");
        Ok(records)
    }

    /// Parse CSV text and convert every record into a [`RowEntry`].
    pub fn load_from_str(input: &str) -> Result<Vec<RowEntry>, CsvLoadError> {
        Ok(Self::parse(input.as_bytes())?
            .into_iter()
            .map(RowEntry::from)
            .collect())
    }

    /// Read a file from disk and delegate to [`load_from_str`](Self::load_from_str).
    pub fn load_from_file(path: &Path) -> Result<Vec<RowEntry>, CsvLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&contents)
    }
}
