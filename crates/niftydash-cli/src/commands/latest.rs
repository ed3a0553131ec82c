use niftydash_core::{latest_updates, DashboardConfig, StockRepository};
use serde::Serialize;

use crate::cli::LimitArgs;
use crate::error::CliError;

use super::{load_timed, resolve_limit, stock_rows, CommandResult, StockRow};

#[derive(Debug, Serialize)]
struct LatestResponseData<'a> {
    limit: usize,
    stocks: Vec<StockRow<'a>>,
}

pub async fn run(
    args: &LimitArgs,
    repository: &StockRepository,
    config: &DashboardConfig,
) -> Result<CommandResult, CliError> {
    let limit = resolve_limit(args.limit, config.latest_updates_limit)?;
    let (stocks, latency_ms) = load_timed(repository).await;
    let latest = latest_updates(&stocks, limit);

    let data = serde_json::to_value(LatestResponseData {
        limit,
        stocks: stock_rows(&latest),
    })?;

    Ok(CommandResult::ok(data).with_latency(latency_ms))
}
