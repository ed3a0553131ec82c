use niftydash_core::{filter_stocks, StockRepository};
use serde::Serialize;

use crate::cli::SearchArgs;
use crate::error::CliError;

use super::{load_timed, resolve_limit, stock_rows, CommandResult, StockRow};

#[derive(Debug, Serialize)]
struct SearchResponseData<'a> {
    query: &'a str,
    matches: usize,
    stocks: Vec<StockRow<'a>>,
}

pub async fn run(args: &SearchArgs, repository: &StockRepository) -> Result<CommandResult, CliError> {
    let (stocks, latency_ms) = load_timed(repository).await;
    let results = filter_stocks(&stocks, &args.query);
    let limit = resolve_limit(args.limit, results.len())?;
    tracing::debug!(query = args.query.as_str(), matches = results.len(), "search");

    let data = serde_json::to_value(SearchResponseData {
        query: &args.query,
        matches: results.len(),
        stocks: stock_rows(&results[..limit.min(results.len())]),
    })?;

    Ok(CommandResult::ok(data).with_latency(latency_ms))
}
