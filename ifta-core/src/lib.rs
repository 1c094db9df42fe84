pub mod calculations;
pub mod config;
pub mod ledger;
pub mod models;

pub use calculations::apportion;
pub use config::{ConfigError, IftaConfig};
pub use ledger::{FuelLedger, LedgerError, RowEntry};
pub use models::*;
