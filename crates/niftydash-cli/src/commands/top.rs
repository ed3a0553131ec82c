use niftydash_core::{top_performers, DashboardConfig, StockRepository};
use serde::Serialize;

use crate::cli::LimitArgs;
use crate::error::CliError;

use super::{load_timed, resolve_limit, stock_rows, CommandResult, StockRow};

#[derive(Debug, Serialize)]
struct TopResponseData<'a> {
    limit: usize,
    stocks: Vec<StockRow<'a>>,
}

pub async fn run(
    args: &LimitArgs,
    repository: &StockRepository,
    config: &DashboardConfig,
) -> Result<CommandResult, CliError> {
    let limit = resolve_limit(args.limit, config.top_performers_limit)?;
    let (stocks, latency_ms) = load_timed(repository).await;
    let top = top_performers(&stocks, limit);

    let data = serde_json::to_value(TopResponseData {
        limit,
        stocks: stock_rows(&top),
    })?;

    let mut result = CommandResult::ok(data).with_latency(latency_ms);
    if top.is_empty() {
        result = result.with_warning("no stock has a positive change today");
    }
    Ok(result)
}
