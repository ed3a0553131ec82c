//! Core contracts for niftydash.
//!
//! This crate contains:
//! - Canonical stock records and validation
//! - The in-memory repository behind the [`StockSource`] seam
//! - Debounced search over the collection
//! - Derived views (top performers, latest updates, synthetic charts)
//! - Response envelope and structured errors

pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod format;
pub mod repository;
pub mod scheduler;
pub mod search;
pub mod views;

pub use config::DashboardConfig;
pub use domain::{ChartPoint, StockRecord, Symbol, Timestamp, Trend};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta, SCHEMA_VERSION};
pub use error::{CoreError, ValidationError};
pub use repository::{StockLookup, StockRepository, StockSource, NIFTY50_DATASET_NAME};
pub use scheduler::{ManualScheduler, Scheduler, Task, TaskHandle, TokioScheduler};
pub use search::{
    filter_stocks, matches_query, FilterSnapshot, SearchSession, DEFAULT_QUIET_PERIOD,
};
pub use views::{
    latest_updates, synthetic_series, top_performers, ChartData, ChartViewport, PlotPoint,
    RandomSource, SyntheticSeries, LATEST_UPDATES_LIMIT, SERIES_LEN, SERIES_VARIATION,
    TOP_PERFORMERS_LIMIT,
};
