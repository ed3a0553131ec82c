use niftydash_core::format::format_currency;
use niftydash_core::{
    synthetic_series, ChartData, ChartViewport, EnvelopeError, PlotPoint, StockLookup,
    StockRepository, StockSource,
};
use serde::Serialize;
use time::OffsetDateTime;

use crate::cli::ShowArgs;
use crate::error::CliError;

use super::{load_timed, CommandResult, StockRow};

#[derive(Debug, Serialize)]
struct ShowResponseData<'a> {
    stock: StockRow<'a>,
    chart: ChartView,
}

#[derive(Debug, Serialize)]
struct ChartView {
    #[serde(flatten)]
    data: ChartData,
    plot: Vec<PlotPoint>,
    display: ChartSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct ChartSummary {
    high: String,
    low: String,
    range: String,
}

pub async fn run(args: &ShowArgs, repository: &StockRepository) -> Result<CommandResult, CliError> {
    // Detail views resolve after the collection has loaded.
    let (_, latency_ms) = load_timed(repository).await;

    let record = match repository.find_by_symbol(&args.symbol) {
        StockLookup::Found(record) => record,
        StockLookup::NotFound { symbol } => {
            let mut result =
                CommandResult::failed(EnvelopeError::stock_not_found(&symbol)).with_latency(latency_ms);
            let upper = symbol.to_ascii_uppercase();
            if upper != symbol && repository.find_by_symbol(&upper).is_found() {
                result = result.with_warning(format!(
                    "symbols are case-sensitive; did you mean '{upper}'?"
                ));
            }
            return Ok(result);
        }
    };

    let today = OffsetDateTime::now_utc().date();
    let rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let chart = ChartData::collect(synthetic_series(record.price, today, rng));
    let plot = chart.plot(ChartViewport::default());
    let display = ChartSummary {
        high: format_currency(chart.high),
        low: format_currency(chart.low),
        range: format_currency(chart.range),
    };

    let data = serde_json::to_value(ShowResponseData {
        stock: StockRow::new(&record),
        chart: ChartView {
            data: chart,
            plot,
            display,
            seed: args.seed,
        },
    })?;

    Ok(CommandResult::ok(data).with_latency(latency_ms))
}
