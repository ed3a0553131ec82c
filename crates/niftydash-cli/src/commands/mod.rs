mod latest;
mod search;
mod show;
mod stocks;
mod top;
pub mod watch;

use std::time::Instant;

use niftydash_core::format::{format_change, format_currency, format_market_cap, format_volume};
use niftydash_core::{
    DashboardConfig, Envelope, EnvelopeError, EnvelopeMeta, StockRecord, StockRepository,
    StockSource, Trend, NIFTY50_DATASET_NAME,
};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
            latency_ms: 0,
        }
    }

    pub fn failed(error: EnvelopeError) -> Self {
        Self {
            data: Value::Null,
            warnings: Vec::new(),
            errors: vec![error],
            latency_ms: 0,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}

pub async fn run(cli: &Cli, config: &DashboardConfig) -> Result<Envelope<Value>, CliError> {
    let repository = StockRepository::nifty50()?.with_load_latency(config.load_latency);

    let command_result = match &cli.command {
        Command::Stocks(args) => stocks::run(args, &repository).await?,
        Command::Search(args) => search::run(args, &repository).await?,
        Command::Show(args) => show::run(args, &repository).await?,
        Command::Top(args) => top::run(args, &repository, config).await?,
        Command::Latest(args) => latest::run(args, &repository, config).await?,
        Command::Watch(_) => {
            return Err(CliError::Command(String::from(
                "watch renders its own output stream",
            )))
        }
    };

    let CommandResult {
        data,
        warnings,
        errors,
        latency_ms,
    } = command_result;

    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), NIFTY50_DATASET_NAME, latency_ms)?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}

/// Loads the collection and reports how long the load took.
pub async fn load_timed(source: &dyn StockSource) -> (Vec<StockRecord>, u64) {
    let started = Instant::now();
    let stocks = source.load_all().await;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    (stocks, latency_ms)
}

/// `None` keeps `default`; zero is rejected.
pub fn resolve_limit(limit: Option<usize>, default: usize) -> Result<usize, CliError> {
    match limit {
        Some(0) => Err(CliError::Command(String::from(
            "--limit must be greater than zero",
        ))),
        Some(limit) => Ok(limit),
        None => Ok(default),
    }
}

/// Stock record plus its presentation strings.
#[derive(Debug, Serialize)]
pub struct StockRow<'a> {
    #[serde(flatten)]
    pub record: &'a StockRecord,
    pub trend: Trend,
    pub display: StockDisplay,
}

#[derive(Debug, Serialize)]
pub struct StockDisplay {
    pub price: String,
    pub change: String,
    pub volume: String,
    pub market_cap: String,
    pub arrow: &'static str,
}

impl<'a> StockRow<'a> {
    pub fn new(record: &'a StockRecord) -> Self {
        let trend = record.trend();
        Self {
            record,
            trend,
            display: StockDisplay {
                price: format_currency(record.price),
                change: format_change(record.change),
                volume: format_volume(record.volume),
                market_cap: format_market_cap(record.market_cap),
                arrow: trend.arrow(),
            },
        }
    }
}

pub fn stock_rows(stocks: &[StockRecord]) -> Vec<StockRow<'_>> {
    stocks.iter().map(StockRow::new).collect()
}
