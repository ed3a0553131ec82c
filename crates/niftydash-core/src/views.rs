//! Derived, recomputed-on-demand projections of the stock collection.
//!
//! | Function | Output |
//! |----------|--------|
//! | [`top_performers`] | Best positive movers, stable by repository order on ties |
//! | [`latest_updates`] | Prefix of the collection |
//! | [`synthetic_series`] | Lazy 30-point synthetic price series |
//! | [`ChartData::collect`] | Series plus High / Low / Range summary |
//!
//! Nothing here is cached; each call may produce a fresh series.

use std::iter::FusedIterator;

use serde::Serialize;
use time::{Date, Duration as DateDuration};

use crate::{ChartPoint, StockRecord};

pub const TOP_PERFORMERS_LIMIT: usize = 3;
pub const LATEST_UPDATES_LIMIT: usize = 5;
pub const SERIES_LEN: usize = 30;
/// Maximum relative deviation of a synthetic point from the base price.
pub const SERIES_VARIATION: f64 = 0.05;

/// Positive movers sorted by change, highest first, at most `limit`.
pub fn top_performers(stocks: &[StockRecord], limit: usize) -> Vec<StockRecord> {
    let mut positive: Vec<StockRecord> = stocks
        .iter()
        .filter(|stock| stock.is_positive())
        .cloned()
        .collect();
    // `sort_by` is stable: equal changes keep repository order.
    positive.sort_by(|a, b| b.change.total_cmp(&a.change));
    positive.truncate(limit);
    positive
}

/// First `limit` records in repository order.
pub fn latest_updates(stocks: &[StockRecord], limit: usize) -> Vec<StockRecord> {
    stocks.iter().take(limit).cloned().collect()
}

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl RandomSource for fastrand::Rng {
    fn next_unit(&mut self) -> f64 {
        self.f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Lazy synthetic price series. Yields exactly [`SERIES_LEN`] points once.
#[derive(Debug)]
pub struct SyntheticSeries<R> {
    base_price: f64,
    today: Date,
    rng: R,
    next: usize,
}

/// Builds the series for `base_price`, ending on `today`.
///
/// Point `i` has `price = base * (1 + u)` with `u` uniform in
/// `[-0.05, 0.05)` and `date = today - (29 - i)` days.
pub fn synthetic_series<R: RandomSource>(
    base_price: f64,
    today: Date,
    rng: R,
) -> SyntheticSeries<R> {
    SyntheticSeries {
        base_price,
        today,
        rng,
        next: 0,
    }
}

impl<R: RandomSource> Iterator for SyntheticSeries<R> {
    type Item = ChartPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= SERIES_LEN {
            return None;
        }
        let offset = self.next;
        self.next += 1;

        let variation = (self.rng.next_unit() - 0.5) * (2.0 * SERIES_VARIATION);
        let days_back = (SERIES_LEN - 1 - offset) as i64;

        Some(ChartPoint {
            index: offset + 1,
            price: below_upper_band(self.base_price * (1.0 + variation), self.base_price),
            date: self
                .today
                .checked_sub(DateDuration::days(days_back))
                .unwrap_or(Date::MIN),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = SERIES_LEN - self.next;
        (remaining, Some(remaining))
    }
}

/// Rounding can land the top draw exactly on `base * 1.05`; the band is
/// half-open, so such a price steps down to the largest float below it.
fn below_upper_band(price: f64, base_price: f64) -> f64 {
    let upper = base_price * (1.0 + SERIES_VARIATION);
    if upper > 0.0 && price >= upper {
        f64::from_bits(upper.to_bits() - 1)
    } else {
        price
    }
}

impl<R: RandomSource> ExactSizeIterator for SyntheticSeries<R> {}

impl<R: RandomSource> FusedIterator for SyntheticSeries<R> {}

/// Collected series with its summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub points: Vec<ChartPoint>,
    pub high: f64,
    pub low: f64,
    /// `high - low`; may be zero.
    pub range: f64,
}

impl ChartData {
    /// Drains `points` and computes High / Low / Range. An empty input
    /// yields all-zero statistics.
    pub fn collect(points: impl IntoIterator<Item = ChartPoint>) -> Self {
        let points: Vec<ChartPoint> = points.into_iter().collect();
        if points.is_empty() {
            return Self {
                points,
                high: 0.0,
                low: 0.0,
                range: 0.0,
            };
        }

        let (low, high) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), point| {
                (low.min(point.price), high.max(point.price))
            });

        Self {
            points,
            high,
            low,
            range: high - low,
        }
    }

    /// Position of `price` within `[low, high]` as `0.0..=1.0`.
    ///
    /// A flat series (`range == 0`) maps everything to the midpoint.
    pub fn normalize(&self, price: f64) -> f64 {
        if self.range <= 0.0 {
            return 0.5;
        }
        ((price - self.low) / self.range).clamp(0.0, 1.0)
    }

    /// Polyline coordinates for `viewport`.
    pub fn plot(&self, viewport: ChartViewport) -> Vec<PlotPoint> {
        let last = self.points.len().saturating_sub(1);
        self.points
            .iter()
            .enumerate()
            .map(|(position, point)| {
                let fraction = if last == 0 {
                    0.0
                } else {
                    position as f64 / last as f64
                };
                PlotPoint {
                    x: viewport.left + fraction * viewport.width,
                    y: viewport.baseline - self.normalize(point.price) * viewport.height,
                }
            })
            .collect()
    }
}

/// Drawing area for [`ChartData::plot`], in the SVG's user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartViewport {
    pub left: f64,
    pub width: f64,
    /// y of the lowest price; higher prices go up (towards 0).
    pub baseline: f64,
    pub height: f64,
}

impl Default for ChartViewport {
    fn default() -> Self {
        Self {
            left: 10.0,
            width: 380.0,
            baseline: 70.0,
            height: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use time::Month;

    use super::*;
    use crate::domain::fixtures::stock;

    struct Cycle {
        values: Vec<f64>,
        position: usize,
    }

    impl RandomSource for Cycle {
        fn next_unit(&mut self) -> f64 {
            let value = self.values[self.position % self.values.len()];
            self.position += 1;
            value
        }
    }

    fn today() -> Date {
        Date::from_calendar_date(2024, Month::March, 30).expect("valid date")
    }

    fn symbols(stocks: &[StockRecord]) -> Vec<&str> {
        stocks.iter().map(|s| s.symbol.as_str()).collect()
    }

    #[test]
    fn top_performers_sorts_stably_and_drops_negatives() {
        let stocks = vec![
            stock("A", "Alpha", 2.0),
            stock("B", "Beta", 5.0),
            stock("C", "Gamma", -1.0),
            stock("D", "Delta", 5.0),
        ];
        assert_eq!(
            symbols(&top_performers(&stocks, TOP_PERFORMERS_LIMIT)),
            vec!["B", "D", "A"]
        );
    }

    #[test]
    fn top_performers_does_not_pad() {
        let stocks = vec![stock("A", "Alpha", 0.0), stock("B", "Beta", 1.0)];
        assert_eq!(symbols(&top_performers(&stocks, 3)), vec!["B"]);
    }

    #[test]
    fn latest_updates_is_a_prefix() {
        let stocks = vec![
            stock("A", "Alpha", 1.0),
            stock("B", "Beta", -1.0),
            stock("C", "Gamma", 0.0),
        ];
        assert_eq!(
            symbols(&latest_updates(&stocks, LATEST_UPDATES_LIMIT)),
            vec!["A", "B", "C"]
        );
    }

    #[test]
    fn series_is_exactly_thirty_points_ending_today() {
        let series = synthetic_series(100.0, today(), fastrand::Rng::with_seed(7));
        assert_eq!(series.len(), SERIES_LEN);

        let points: Vec<ChartPoint> = series.collect();
        assert_eq!(points.len(), 30);
        assert_eq!(points[0].index, 1);
        assert_eq!(points[29].index, 30);
        assert_eq!(points[29].date, today());
        assert_eq!(
            points[0].date,
            Date::from_calendar_date(2024, Month::March, 1).expect("valid date")
        );
        for point in &points {
            assert!((95.0..105.0).contains(&point.price), "{}", point.price);
        }
    }

    #[test]
    fn series_is_exhausted_after_one_pass() {
        let mut series = synthetic_series(100.0, today(), fastrand::Rng::with_seed(1));
        assert_eq!(series.by_ref().count(), 30);
        assert!(series.next().is_none());
    }

    #[test]
    fn deterministic_source_gives_exact_prices() {
        let rng = Cycle {
            values: vec![0.0, 0.5, 0.75],
            position: 0,
        };
        let chart = ChartData::collect(synthetic_series(200.0, today(), rng));

        assert!((chart.points[0].price - 190.0).abs() < 1e-9);
        assert!((chart.points[1].price - 200.0).abs() < 1e-9);
        assert!((chart.points[2].price - 205.0).abs() < 1e-9);
        assert!((chart.low - 190.0).abs() < 1e-9);
        assert!((chart.high - 205.0).abs() < 1e-9);
        assert!((chart.range - 15.0).abs() < 1e-9);
    }

    #[test]
    fn largest_draw_stays_below_upper_band() {
        let rng = Cycle {
            values: vec![1.0 - f64::EPSILON, 0.0],
            position: 0,
        };
        let points: Vec<ChartPoint> = synthetic_series(100.0, today(), rng).collect();

        for point in &points {
            assert!((95.0..105.0).contains(&point.price), "{}", point.price);
        }
        assert!(points[0].price > 104.999);
        assert!((points[1].price - 95.0).abs() < 1e-9);
    }

    #[test]
    fn flat_series_has_zero_range_and_plots_on_midline() {
        let rng = Cycle {
            values: vec![0.5],
            position: 0,
        };
        let chart = ChartData::collect(synthetic_series(100.0, today(), rng));
        assert_eq!(chart.range, 0.0);

        let plotted = chart.plot(ChartViewport::default());
        assert_eq!(plotted.len(), 30);
        assert!(plotted.iter().all(|p| (p.y - 45.0).abs() < 1e-9));
        assert!((plotted[0].x - 10.0).abs() < 1e-9);
        assert!((plotted[29].x - 390.0).abs() < 1e-9);
    }

    #[test]
    fn plot_maps_low_to_baseline_and_high_to_top() {
        let rng = Cycle {
            values: vec![0.0, 0.75],
            position: 0,
        };
        let chart = ChartData::collect(synthetic_series(100.0, today(), rng));
        let plotted = chart.plot(ChartViewport::default());

        assert!((plotted[0].y - 70.0).abs() < 1e-9);
        assert!((plotted[1].y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn empty_chart_is_all_zero() {
        let chart = ChartData::collect(Vec::new());
        assert_eq!((chart.high, chart.low, chart.range), (0.0, 0.0, 0.0));
        assert!(chart.plot(ChartViewport::default()).is_empty());
    }
}
