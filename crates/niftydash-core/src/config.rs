//! Runtime settings resolved from the environment.
//!
//! | Variable | Default | Field |
//! |----------|---------|-------|
//! | `NIFTYDASH_LOAD_LATENCY_MS` | `500` | [`DashboardConfig::load_latency`] |
//! | `NIFTYDASH_QUIET_PERIOD_MS` | `300` | [`DashboardConfig::quiet_period`] |

use std::env;
use std::time::Duration;

use crate::search::DEFAULT_QUIET_PERIOD;
use crate::views::{LATEST_UPDATES_LIMIT, TOP_PERFORMERS_LIMIT};
use crate::ValidationError;

pub const LOAD_LATENCY_ENV: &str = "NIFTYDASH_LOAD_LATENCY_MS";
pub const QUIET_PERIOD_ENV: &str = "NIFTYDASH_QUIET_PERIOD_MS";

pub const DEFAULT_LOAD_LATENCY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Simulated delay before `load_all` resolves.
    pub load_latency: Duration,
    /// Debounce quiet period for search input.
    pub quiet_period: Duration,
    pub top_performers_limit: usize,
    pub latest_updates_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            load_latency: DEFAULT_LOAD_LATENCY,
            quiet_period: DEFAULT_QUIET_PERIOD,
            top_performers_limit: TOP_PERFORMERS_LIMIT,
            latest_updates_limit: LATEST_UPDATES_LIMIT,
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by `NIFTYDASH_*` variables that are set.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(latency) = read_millis(&lookup, LOAD_LATENCY_ENV)? {
            config.load_latency = latency;
        }
        if let Some(quiet) = read_millis(&lookup, QUIET_PERIOD_ENV)? {
            config.quiet_period = quiet;
        }
        Ok(config)
    }

    pub fn with_load_latency(mut self, load_latency: Duration) -> Self {
        self.load_latency = load_latency;
        self
    }

    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }
}

fn read_millis<F>(lookup: &F, key: &'static str) -> Result<Option<Duration>, ValidationError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<u64>()
        .map(|millis| Some(Duration::from_millis(millis)))
        .map_err(|_| ValidationError::InvalidConfig { key, value: raw })
}
