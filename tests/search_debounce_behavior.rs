//! Behavior-driven tests for debounced search filtering
//!
//! These tests verify WHEN the filtered view is recomputed while a user is
//! typing, and WHAT it contains once the input settles.

use std::sync::Arc;
use std::time::Duration;

use niftydash_core::{
    filter_stocks, ManualScheduler, SearchSession, StockRecord, StockRepository, TokioScheduler,
};
use niftydash_tests::{stock, symbols};

fn catalog() -> Arc<[StockRecord]> {
    Arc::from(vec![
        stock("RELIANCE", "Reliance Industries", 0.5),
        stock("TCS", "Tata Consultancy Services", 0.5),
        stock("INFY", "Infosys", 0.5),
        stock("TATAMOTORS", "Tata Motors", 0.5),
    ])
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

// =============================================================================
// Search: Trailing Debounce
// =============================================================================

#[test]
fn when_user_types_in_a_burst_only_the_final_query_is_filtered_once() {
    // Given: A session with the 300 ms quiet period on a virtual clock
    let scheduler = ManualScheduler::new();
    let session = SearchSession::new(catalog(), scheduler.clone());
    assert_eq!(session.quiet_period(), ms(300));

    // When: Keystrokes land at t=0, 100, 150 and 450 ending in "tcs"
    for (at, query) in [(0, "t"), (100, "tc"), (150, "tcx"), (450, "tcs")] {
        scheduler.advance_until(ms(at));
        session.set_query(query);
    }

    // Then: Nothing is recomputed before t=750
    scheduler.advance_to(ms(749));
    assert_eq!(session.recomputations(), 0);
    assert_eq!(session.effective_query(), "");
    assert!(session.is_pending());

    // And: Exactly one recomputation happens at t=750 using "tcs"
    assert_eq!(scheduler.advance_to(ms(750)), 1);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.generation, 1);
    assert_eq!(snapshot.query, "tcs");
    assert_eq!(symbols(&snapshot.stocks), vec!["TCS"]);

    // And: No stale update fires later
    scheduler.advance(Duration::from_secs(5));
    assert_eq!(session.recomputations(), 1);
    assert!(!session.is_pending());
}

#[test]
fn when_input_pauses_longer_than_quiet_period_each_pause_recomputes() {
    // Given: A session on a virtual clock
    let scheduler = ManualScheduler::new();
    let session = SearchSession::new(catalog(), scheduler.clone());
    let updates = session.subscribe();

    // When: Two queries are separated by more than the quiet period
    session.set_query("tata");
    scheduler.advance(ms(400));
    let first = updates.borrow().clone();
    session.set_query("infy");
    scheduler.advance(ms(400));

    // Then: Each one produced its own recomputation, in input order
    assert_eq!(first.generation, 1);
    assert_eq!(symbols(&first.stocks), vec!["TCS", "TATAMOTORS"]);
    let second = updates.borrow().clone();
    assert_eq!(second.generation, 2);
    assert_eq!(symbols(&second.stocks), vec!["INFY"]);
}

#[test]
fn when_query_is_cleared_full_list_is_restored() {
    // Given: A session that has already narrowed the list
    let scheduler = ManualScheduler::new();
    let session = SearchSession::new(catalog(), scheduler.clone());
    session.set_query("infosys");
    scheduler.advance(ms(300));
    assert_eq!(session.snapshot().stocks.len(), 1);

    // When: The user clears the box
    session.set_query("   ");
    scheduler.advance(ms(300));

    // Then: Every record is back, in repository order
    assert_eq!(
        symbols(&session.snapshot().stocks),
        vec!["RELIANCE", "TCS", "INFY", "TATAMOTORS"]
    );
}

#[tokio::test(start_paused = true)]
async fn when_running_on_tokio_timers_the_same_burst_collapses() {
    // Given: A session on real tokio timers (paused clock)
    let session = SearchSession::new(catalog(), TokioScheduler::current());
    let mut updates = session.subscribe();
    let started = tokio::time::Instant::now();

    // When: Keystrokes land at t=0, 100, 150 and 400
    session.set_query("t");
    tokio::time::sleep(ms(100)).await;
    session.set_query("tc");
    tokio::time::sleep(ms(50)).await;
    session.set_query("tcx");
    tokio::time::sleep(ms(250)).await;
    session.set_query("tcs");

    // Then: The single update arrives a quiet period after the last keystroke
    updates.changed().await.expect("session is alive");
    assert!(started.elapsed() >= ms(700));
    let snapshot = updates.borrow_and_update().clone();
    assert_eq!(snapshot.generation, 1);
    assert_eq!(snapshot.query, "tcs");

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!updates.has_changed().expect("session is alive"));
}

// =============================================================================
// Search: Predicate
// =============================================================================

#[test]
fn when_query_matches_symbol_case_insensitively_stock_is_included() {
    // Given / When: "tcs" against the catalog
    let stocks = catalog();
    let results = filter_stocks(&stocks, "tcs");

    // Then: TCS is included
    assert_eq!(symbols(&results), vec!["TCS"]);
}

#[test]
fn when_query_has_surrounding_whitespace_it_is_matched_verbatim() {
    // Given: The catalog, which holds "Infosys" and "Tata Motors"
    let stocks = catalog();

    // When / Then: Padding is part of the substring, so these miss
    assert!(filter_stocks(&stocks, "Infosys ").is_empty());
    assert!(filter_stocks(&stocks, " tcs").is_empty());

    // And: Inner whitespace still matches case-insensitively
    assert_eq!(symbols(&filter_stocks(&stocks, "TATA MOTORS")), vec!["TATAMOTORS"]);
}

#[test]
fn when_query_is_blank_every_stock_is_returned() {
    let stocks = catalog();
    assert_eq!(filter_stocks(&stocks, "").len(), stocks.len());
    assert_eq!(filter_stocks(&stocks, " \t").len(), stocks.len());
}

#[test]
fn filtering_twice_with_the_same_query_changes_nothing() {
    // Given: The bundled dataset and a mix of queries
    let repository = StockRepository::nifty50().expect("bundled dataset is valid");
    let stocks = repository.records();

    for query in ["", "tata", "BANK", "m&m", "ltd", "zzz", " Infosys "] {
        // When: The result is filtered again by the same query
        let once = filter_stocks(stocks, query);
        let twice = filter_stocks(&once, query);

        // Then: The set is unchanged
        assert_eq!(once, twice, "query {query:?} is not idempotent");
    }
}
