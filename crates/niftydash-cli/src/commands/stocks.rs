use niftydash_core::StockRepository;
use serde::Serialize;

use crate::cli::ListArgs;
use crate::error::CliError;

use super::{load_timed, resolve_limit, stock_rows, CommandResult, StockRow};

#[derive(Debug, Serialize)]
struct StocksResponseData<'a> {
    total: usize,
    stocks: Vec<StockRow<'a>>,
}

pub async fn run(args: &ListArgs, repository: &StockRepository) -> Result<CommandResult, CliError> {
    let (stocks, latency_ms) = load_timed(repository).await;
    let limit = resolve_limit(args.limit, stocks.len())?;
    let shown = &stocks[..limit.min(stocks.len())];

    let data = serde_json::to_value(StocksResponseData {
        total: stocks.len(),
        stocks: stock_rows(shown),
    })?;

    Ok(CommandResult::ok(data).with_latency(latency_ms))
}
