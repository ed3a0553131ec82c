//! Interactive search: each stdin line is one keystroke-level query update.
//!
//! Lines arriving within the quiet period of each other collapse into a
//! single result, printed once the input has been stable long enough. EOF
//! flushes the last pending query before exiting.

use std::sync::Arc;
use std::time::Instant;

use niftydash_core::{
    DashboardConfig, Envelope, EnvelopeMeta, FilterSnapshot, SearchSession, StockRepository,
    TokioScheduler, NIFTY50_DATASET_NAME,
};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

use crate::cli::{OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

use super::{load_timed, resolve_limit, stock_rows, StockRow};

#[derive(Debug, Serialize)]
struct WatchUpdateData<'a> {
    query: &'a str,
    generation: u64,
    matches: usize,
    stocks: Vec<StockRow<'a>>,
}

pub async fn run(
    args: &WatchArgs,
    config: &DashboardConfig,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let repository = StockRepository::nifty50()?.with_load_latency(config.load_latency);
    let (stocks, load_ms) = load_timed(&repository).await;
    tracing::debug!(load_ms, "watch session ready");

    let session = SearchSession::with_quiet_period(
        Arc::from(stocks),
        TokioScheduler::current(),
        config.quiet_period,
    );
    let mut updates = session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;
    let mut last_input = Instant::now();

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => match line? {
                Some(line) => {
                    last_input = Instant::now();
                    session.set_query(line);
                }
                None => {
                    input_open = false;
                    if !session.is_pending() {
                        break;
                    }
                }
            },
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                let waited_ms = u64::try_from(last_input.elapsed().as_millis()).unwrap_or(u64::MAX);
                emit(&snapshot, args.limit, waited_ms, format, pretty)?;

                if !input_open && !session.is_pending() {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn emit(
    snapshot: &FilterSnapshot,
    limit: Option<usize>,
    latency_ms: u64,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let limit = resolve_limit(limit, snapshot.stocks.len())?;
    let shown = &snapshot.stocks[..limit.min(snapshot.stocks.len())];

    let data = serde_json::to_value(WatchUpdateData {
        query: &snapshot.query,
        generation: snapshot.generation,
        matches: snapshot.stocks.len(),
        stocks: stock_rows(shown),
    })?;
    let meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), NIFTY50_DATASET_NAME, latency_ms)?;

    output::render(&Envelope::success(meta, data), format, pretty)
}
