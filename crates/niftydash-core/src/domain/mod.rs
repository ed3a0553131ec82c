//! # Domain Models
//!
//! Canonical domain types for the niftydash stock dashboard.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StockRecord`] | One instrument with price, change, volume and ranges |
//! | [`Trend`] | Positive / negative classification of the daily change |
//! | [`Symbol`] | Validated NSE symbol |
//! | [`ChartPoint`] | One point of a synthetic price series |
//! | [`Timestamp`] | UTC instant used in response metadata |
//!
//! Records are trusted, fixed data, but [`StockRecord::validate`] still
//! rejects non-finite or negative numerics and inverted ranges when a
//! repository is built.

mod chart;
mod stock;
mod symbol;
mod timestamp;

pub use chart::ChartPoint;
pub use stock::{StockRecord, Trend};
pub use symbol::Symbol;
pub use timestamp::Timestamp;

#[cfg(test)]
pub(crate) use stock::fixtures;
