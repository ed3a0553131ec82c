//! In-memory stock repository.
//!
//! The collection is fixed at construction and shared behind an `Arc`, so
//! every consumer reads the same immutable slice. Loading is simulated as
//! asynchronous with a configurable latency; the latency only exists to
//! exercise loading states in front ends and is zero in tests.
//!
//! ```rust,ignore
//! use niftydash_core::{StockLookup, StockRepository, StockSource};
//!
//! let repository = StockRepository::nifty50()?;
//! let stocks = repository.load_all().await;
//! match repository.find_by_symbol("TCS") {
//!     StockLookup::Found(record) => println!("{} {}", record.symbol, record.price),
//!     StockLookup::NotFound { symbol } => println!("{symbol} not found"),
//! }
//! ```

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::{CoreError, StockRecord, ValidationError};

const NIFTY50_DATASET: &str = include_str!("../data/nifty50.json");

/// Name of the bundled dataset, reported in response metadata.
pub const NIFTY50_DATASET_NAME: &str = "nifty50-static";

/// Result of a symbol lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StockLookup {
    Found(StockRecord),
    NotFound { symbol: String },
}

impl StockLookup {
    pub fn found(self) -> Option<StockRecord> {
        match self {
            Self::Found(record) => Some(record),
            Self::NotFound { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Read-only access to a stock collection.
///
/// Front ends go through this trait and never touch the backing storage.
pub trait StockSource: Send + Sync {
    /// Returns the full collection in insertion order.
    fn load_all<'a>(&'a self) -> Pin<Box<dyn Future<Output = Vec<StockRecord>> + Send + 'a>>;

    /// Exact, case-sensitive match on the symbol.
    fn find_by_symbol(&self, symbol: &str) -> StockLookup;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fixed in-memory stock collection.
#[derive(Debug, Clone)]
pub struct StockRepository {
    stocks: Arc<[StockRecord]>,
    load_latency: Duration,
}

impl StockRepository {
    /// Builds a repository after validating every record and symbol uniqueness.
    pub fn from_records(records: Vec<StockRecord>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record.validate()?;
            if !seen.insert(record.symbol.as_str()) {
                return Err(ValidationError::DuplicateSymbol {
                    symbol: record.symbol.to_string(),
                });
            }
        }

        Ok(Self {
            stocks: Arc::from(records),
            load_latency: Duration::ZERO,
        })
    }

    /// Parses a JSON array of stock records.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let records: Vec<StockRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records)?)
    }

    /// The bundled NIFTY50 snapshot.
    pub fn nifty50() -> Result<Self, CoreError> {
        Self::from_json(NIFTY50_DATASET)
    }

    pub fn with_load_latency(mut self, load_latency: Duration) -> Self {
        self.load_latency = load_latency;
        self
    }

    /// Borrow the collection without the simulated latency.
    pub fn records(&self) -> &[StockRecord] {
        &self.stocks
    }
}

impl StockSource for StockRepository {
    fn load_all<'a>(&'a self) -> Pin<Box<dyn Future<Output = Vec<StockRecord>> + Send + 'a>> {
        Box::pin(async move {
            if !self.load_latency.is_zero() {
                tracing::debug!(
                    latency_ms = self.load_latency.as_millis() as u64,
                    "simulating stock load"
                );
                tokio::time::sleep(self.load_latency).await;
            }
            tracing::debug!(count = self.stocks.len(), "stocks loaded");
            self.stocks.to_vec()
        })
    }

    fn find_by_symbol(&self, symbol: &str) -> StockLookup {
        match self.stocks.iter().find(|record| record.symbol == *symbol) {
            Some(record) => StockLookup::Found(record.clone()),
            None => {
                tracing::debug!(symbol, "stock lookup missed");
                StockLookup::NotFound {
                    symbol: symbol.to_owned(),
                }
            }
        }
    }

    fn len(&self) -> usize {
        self.stocks.len()
    }
}
