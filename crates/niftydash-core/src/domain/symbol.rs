use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 20;

/// NSE trading symbol such as `TCS`, `M&M` or `BAJAJ-AUTO`.
///
/// Stored uppercase; equality against `str` is exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let symbol = input.trim().to_ascii_uppercase();
        check_nse_symbol(&symbol)?;
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Letters first, then letters, digits and the `&`, `-`, `.` NSE uses.
fn check_nse_symbol(symbol: &str) -> Result<(), ValidationError> {
    let mut chars = symbol.chars();
    let first = chars.next().ok_or(ValidationError::EmptySymbol)?;
    if !first.is_ascii_alphabetic() {
        return Err(ValidationError::SymbolInvalidStart { ch: first });
    }

    let len = symbol.chars().count();
    if len > MAX_SYMBOL_LEN {
        return Err(ValidationError::SymbolTooLong {
            len,
            max: MAX_SYMBOL_LEN,
        });
    }

    match symbol
        .chars()
        .enumerate()
        .find(|&(_, ch)| !(ch.is_ascii_alphanumeric() || matches!(ch, '&' | '-' | '.')))
    {
        Some((index, ch)) => Err(ValidationError::SymbolInvalidChar { ch, index }),
        None => Ok(()),
    }
}

impl FromStr for Symbol {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
