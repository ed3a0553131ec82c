//! Shared fixtures for the niftydash behavior tests.

pub use niftydash_core::{StockRecord, Symbol};

/// Valid record priced at 500 with a ±2 % day range and ±20 % 52-week range.
pub fn stock(symbol: &str, name: &str, change: f64) -> StockRecord {
    StockRecord {
        symbol: Symbol::parse(symbol).expect("fixture symbol must be valid"),
        name: name.to_owned(),
        logo_url: String::new(),
        price: 500.0,
        change,
        volume: 75_000,
        day_low: 490.0,
        day_high: 510.0,
        week_low_52: 400.0,
        week_high_52: 600.0,
        market_cap: 2.0e11,
    }
}

pub fn symbols(stocks: &[StockRecord]) -> Vec<&str> {
    stocks.iter().map(|s| s.symbol.as_str()).collect()
}
