use serde::{Deserialize, Serialize};

use crate::{Symbol, ValidationError};

/// Direction of a stock's daily move.
///
/// Only a strictly positive change counts as [`Trend::Positive`]; a flat day
/// is displayed the same way as a losing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Positive,
    Negative,
}

impl Trend {
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Positive => "↗",
            Self::Negative => "↘",
        }
    }
}

/// One tradable instrument in the dashboard's fixed collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub symbol: Symbol,
    pub name: String,
    #[serde(alias = "logo", default)]
    pub logo_url: String,
    pub price: f64,
    /// Daily change in percent.
    pub change: f64,
    pub volume: u64,
    pub day_low: f64,
    pub day_high: f64,
    pub week_low_52: f64,
    pub week_high_52: f64,
    pub market_cap: f64,
}

impl StockRecord {
    pub fn trend(&self) -> Trend {
        Trend::from_change(self.change)
    }

    pub fn is_positive(&self) -> bool {
        self.trend() == Trend::Positive
    }

    /// Checks numeric fields and the day / 52-week range ordering.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_non_negative("price", self.price)?;
        validate_finite("change", self.change)?;
        validate_non_negative("dayLow", self.day_low)?;
        validate_non_negative("dayHigh", self.day_high)?;
        validate_non_negative("weekLow52", self.week_low_52)?;
        validate_non_negative("weekHigh52", self.week_high_52)?;
        validate_non_negative("marketCap", self.market_cap)?;

        if self.day_low > self.day_high {
            return Err(self.inverted("dayLow", "dayHigh"));
        }
        if self.week_low_52 > self.week_high_52 {
            return Err(self.inverted("weekLow52", "weekHigh52"));
        }

        Ok(())
    }

    fn inverted(&self, low: &'static str, high: &'static str) -> ValidationError {
        ValidationError::InvertedRange {
            symbol: self.symbol.to_string(),
            low,
            high,
        }
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Minimal valid record; tests override only what they care about.
    pub fn stock(symbol: &str, name: &str, change: f64) -> StockRecord {
        StockRecord {
            symbol: Symbol::parse(symbol).expect("fixture symbol"),
            name: name.to_owned(),
            logo_url: String::new(),
            price: 100.0,
            change,
            volume: 1_000,
            day_low: 99.0,
            day_high: 101.0,
            week_low_52: 80.0,
            week_high_52: 120.0,
            market_cap: 1.0e12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::stock;
    use super::*;

    #[test]
    fn zero_change_is_classified_negative() {
        assert_eq!(stock("TCS", "Tata", 0.0).trend(), Trend::Negative);
        assert_eq!(stock("TCS", "Tata", 0.01).trend(), Trend::Positive);
    }

    #[test]
    fn rejects_inverted_day_range() {
        let mut record = stock("INFY", "Infosys", 1.0);
        record.day_low = 200.0;
        let err = record.validate().expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::InvertedRange { low: "dayLow", .. }
        ));
    }

    #[test]
    fn rejects_negative_price() {
        let mut record = stock("INFY", "Infosys", 1.0);
        record.price = -1.0;
        assert_eq!(
            record.validate(),
            Err(ValidationError::NegativeValue { field: "price" })
        );
    }

    #[test]
    fn deserializes_camel_case_with_logo_alias() {
        let json = r#"{
            "symbol": "tcs", "name": "Tata Consultancy Services",
            "logo": "https://example.invalid/tcs.png",
            "price": 3500.5, "change": 1.25, "volume": 120000,
            "dayLow": 3480.0, "dayHigh": 3520.0,
            "weekLow52": 3000.0, "weekHigh52": 4000.0, "marketCap": 1.3e13
        }"#;
        let record: StockRecord = serde_json::from_str(json).expect("must parse");
        assert_eq!(record.symbol.as_str(), "TCS");
        assert_eq!(record.logo_url, "https://example.invalid/tcs.png");
        assert_eq!(record.week_high_52, 4000.0);
    }
}
