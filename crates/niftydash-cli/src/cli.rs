//! CLI argument definitions for niftydash.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `stocks` | List the full NIFTY50 collection |
//! | `search` | Filter by name or symbol |
//! | `show` | One stock with its synthetic 30-day chart |
//! | `top` | Top performers by daily change |
//! | `latest` | Latest updates |
//! | `watch` | Debounced search driven by stdin lines |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings and errors as failures |
//! | `--load-latency-ms` | env or `500` | Simulated load latency |
//! | `--quiet-period-ms` | env or `300` | Search debounce quiet period |
//!
//! # Examples
//!
//! ```bash
//! niftydash top --pretty
//! niftydash search tata --format table
//! niftydash show TCS --seed 42 --load-latency-ms 0
//! printf 't\ntc\ntcs\n' | niftydash watch --format ndjson
//! ```

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use niftydash_core::{DashboardConfig, ValidationError};

/// NIFTY50 stock dashboard on the command line.
#[derive(Debug, Parser)]
#[command(
    name = "niftydash",
    author,
    version,
    about = "NIFTY50 stock dashboard: listings, search, movers and charts"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Simulated repository load latency in milliseconds.
    #[arg(long, global = true)]
    pub load_latency_ms: Option<u64>,

    /// Search debounce quiet period in milliseconds.
    #[arg(long, global = true)]
    pub quiet_period_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Environment first, then flags on top.
    pub fn resolve_config(&self) -> Result<DashboardConfig, ValidationError> {
        let mut config = DashboardConfig::from_env()?;
        if let Some(millis) = self.load_latency_ms {
            config = config.with_load_latency(Duration::from_millis(millis));
        }
        if let Some(millis) = self.quiet_period_ms {
            config = config.with_quiet_period(Duration::from_millis(millis));
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Ndjson,
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every stock in repository order.
    Stocks(ListArgs),
    /// Filter stocks by name or symbol (case-insensitive).
    Search(SearchArgs),
    /// Show one stock with a synthetic price chart.
    Show(ShowArgs),
    /// Best positive movers.
    Top(LimitArgs),
    /// First records of the collection.
    Latest(LimitArgs),
    /// Read queries from stdin and print each debounced result.
    Watch(WatchArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Maximum number of rows to print.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Substring to look for; blank matches everything.
    #[arg(default_value = "")]
    pub query: String,

    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Exact, case-sensitive symbol (e.g. `TCS`).
    pub symbol: String,

    /// Seed for a reproducible chart.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct LimitArgs {
    /// Overrides the dashboard default.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Maximum number of matches printed per update.
    #[arg(long)]
    pub limit: Option<usize>,
}
