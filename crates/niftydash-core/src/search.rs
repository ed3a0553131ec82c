//! Search filtering with a trailing debounce.
//!
//! [`filter_stocks`] is the pure predicate pipeline. [`SearchSession`] wraps
//! it for interactive input: every call to [`SearchSession::set_query`]
//! cancels the pending recomputation and schedules a new one after the quiet
//! period, so only the last query of a burst is ever filtered.
//!
//! ```text
//! keystrokes  t=0 "t"   t=100 "tc"   t=150 "tc"   t=450 "tcs"
//! timers      x---------x------------x------------o (fires at 750)
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use crate::scheduler::{Scheduler, TaskHandle};
use crate::StockRecord;

/// Quiet period the raw query must be stable for before it is applied.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Case-insensitive substring match on name or symbol.
///
/// A blank (empty or whitespace-only) query matches every record. Any other
/// query is matched verbatim, surrounding whitespace included.
pub fn matches_query(stock: &StockRecord, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    stock.name.to_lowercase().contains(&needle)
        || stock.symbol.as_str().to_lowercase().contains(&needle)
}

/// Returns the matching subset in repository order.
pub fn filter_stocks(stocks: &[StockRecord], query: &str) -> Vec<StockRecord> {
    if query.trim().is_empty() {
        return stocks.to_vec();
    }
    stocks
        .iter()
        .filter(|stock| matches_query(stock, query))
        .cloned()
        .collect()
}

/// One applied filter result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSnapshot {
    /// The effective (debounced) query.
    pub query: String,
    /// Number of recomputations so far; 0 is the initial unfiltered view.
    pub generation: u64,
    pub stocks: Vec<StockRecord>,
}

struct PendingUpdate {
    ticket: u64,
    handle: TaskHandle,
}

struct SessionState {
    raw_query: String,
    next_ticket: u64,
    pending: Option<PendingUpdate>,
}

struct Shared {
    stocks: Arc<[StockRecord]>,
    state: Mutex<SessionState>,
    publisher: watch::Sender<FilterSnapshot>,
}

impl Shared {
    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .expect("search session state should not be poisoned")
    }

    fn apply(&self, ticket: u64, query: String) {
        let mut state = self.lock();
        match &state.pending {
            Some(pending) if pending.ticket == ticket => {}
            _ => {
                tracing::trace!(ticket, "ignoring superseded search update");
                return;
            }
        }
        state.pending = None;

        let stocks = filter_stocks(&self.stocks, &query);
        let generation = self.publisher.borrow().generation + 1;
        tracing::debug!(
            query = query.as_str(),
            generation,
            matches = stocks.len(),
            "search filter recomputed"
        );

        // Published under the state lock so snapshots are never reordered.
        self.publisher.send_replace(FilterSnapshot {
            query,
            generation,
            stocks,
        });
    }
}

/// Debounced query → filtered list binding.
pub struct SearchSession<S: Scheduler> {
    scheduler: S,
    quiet_period: Duration,
    shared: Arc<Shared>,
}

impl<S: Scheduler> SearchSession<S> {
    pub fn new(stocks: Arc<[StockRecord]>, scheduler: S) -> Self {
        Self::with_quiet_period(stocks, scheduler, DEFAULT_QUIET_PERIOD)
    }

    pub fn with_quiet_period(
        stocks: Arc<[StockRecord]>,
        scheduler: S,
        quiet_period: Duration,
    ) -> Self {
        let initial = FilterSnapshot {
            query: String::new(),
            generation: 0,
            stocks: stocks.to_vec(),
        };
        let (publisher, _) = watch::channel(initial);

        Self {
            scheduler,
            quiet_period,
            shared: Arc::new(Shared {
                stocks,
                state: Mutex::new(SessionState {
                    raw_query: String::new(),
                    next_ticket: 0,
                    pending: None,
                }),
                publisher,
            }),
        }
    }

    /// Records a keystroke. The previous pending update, if any, is
    /// discarded and a new one is scheduled after the quiet period.
    pub fn set_query(&self, raw_query: impl Into<String>) {
        let raw_query = raw_query.into();
        let mut state = self.shared.lock();

        if let Some(previous) = state.pending.take() {
            if self.scheduler.cancel(previous.handle) {
                tracing::trace!(ticket = previous.ticket, "discarded pending search update");
            }
        }

        state.next_ticket += 1;
        let ticket = state.next_ticket;
        state.raw_query = raw_query.clone();

        let shared = Arc::clone(&self.shared);
        let handle = self.scheduler.schedule(
            self.quiet_period,
            Box::new(move || shared.apply(ticket, raw_query)),
        );
        state.pending = Some(PendingUpdate { ticket, handle });
    }

    /// Latest raw input, applied or not.
    pub fn raw_query(&self) -> String {
        self.shared.lock().raw_query.clone()
    }

    /// Query the current filtered list was computed from.
    pub fn effective_query(&self) -> String {
        self.shared.publisher.borrow().query.clone()
    }

    pub fn snapshot(&self) -> FilterSnapshot {
        self.shared.publisher.borrow().clone()
    }

    pub fn recomputations(&self) -> u64 {
        self.shared.publisher.borrow().generation
    }

    pub fn is_pending(&self) -> bool {
        self.shared.lock().pending.is_some()
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Receiver notified on every recomputation.
    pub fn subscribe(&self) -> watch::Receiver<FilterSnapshot> {
        self.shared.publisher.subscribe()
    }
}

impl<S: Scheduler> Drop for SearchSession<S> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.shared.state.lock() {
            if let Some(pending) = state.pending.take() {
                self.scheduler.cancel(pending.handle);
            }
        }
    }
}
