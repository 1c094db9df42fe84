//! Fuel tax calculations.
//!
//! This module provides the numeric coercion applied to user-entered text,
//! the fleet apportionment itself, and the rounding used when results are
//! displayed.

pub mod apportionment;
pub mod common;
pub mod numeric;

pub use apportionment::{apportion, fleet_mpg, net_tax, taxable_gallons};
pub use common::{format_amount, format_quantity};
pub use numeric::{Numeric, coerce};
