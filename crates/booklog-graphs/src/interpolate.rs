//! Spreads each book's pages evenly across its reading days and smooths the
//! daily totals with a trailing rolling mean.

use booklog_common::{date_bounds, ReadingRow};
use chrono::NaiveDate;
use tracing::debug;

/// Joins the labels of books being read on the same day.
pub const TITLE_SEPARATOR: &str = "<br>";

/// Pages and books attributed to one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBucket {
    /// Calendar day
    pub date: NaiveDate,
    /// Sum of the per-day shares of every book read that day
    pub pages: f64,
    /// "Title - Author" of every book read that day, in input order
    pub titles: Vec<String>,
}

/// Contiguous per-day buckets from the earliest start to the latest end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    buckets: Vec<DailyBucket>,
}

impl DailySeries {
    /// Attribute every row's pages to the days it covers.
    ///
    /// Days inside the overall range that no book covers get zero pages and
    /// no titles. An empty input yields an empty series.
    pub fn from_rows(rows: &[ReadingRow]) -> Self {
        let Some((first, last)) = date_bounds(rows) else {
            return Self::default();
        };

        let mut buckets: Vec<DailyBucket> = first
            .iter_days()
            .take_while(|day| *day <= last)
            .map(|date| DailyBucket {
                date,
                pages: 0.0,
                titles: Vec::new(),
            })
            .collect();

        for row in rows {
            let share = row.pages_per_day();
            let label = row.label();
            let from = day_offset(first, row.start_date);
            let to = day_offset(first, row.end_date).max(from);

            for bucket in &mut buckets[from..=to] {
                bucket.pages += share;
                bucket.titles.push(label.clone());
            }
        }

        Self { buckets }
    }

    /// All buckets in date order.
    pub fn buckets(&self) -> &[DailyBucket] {
        &self.buckets
    }

    /// Number of days covered.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether no day is covered.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Bucket for a given day, if covered.
    pub fn get(&self, date: NaiveDate) -> Option<&DailyBucket> {
        let first = self.buckets.first()?.date;
        let offset = usize::try_from((date - first).num_days()).ok()?;
        self.buckets.get(offset)
    }
}

/// One day of the smoothed series, as plotted.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingPoint {
    /// Calendar day
    pub date: NaiveDate,
    /// Daily pages, rounded half to even
    pub pages: f64,
    /// Books read that day joined with [`TITLE_SEPARATOR`]
    pub titles: String,
    /// Mean of the rounded daily pages over the trailing window
    pub rolling_average: f64,
}

impl RollingPoint {
    /// The rolling average as shown on the chart.
    pub fn plotted_value(&self) -> f64 {
        self.rolling_average.round_ties_even()
    }
}

/// The daily series with its rolling mean, indexed by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollingSeries {
    window: usize,
    points: Vec<RollingPoint>,
}

impl RollingSeries {
    /// Smooth a daily series with a trailing window of `window` days.
    ///
    /// Early days use as many observations as exist, so the first point's
    /// average equals its own daily value. A window of zero is treated as one.
    pub fn from_daily(daily: &DailySeries, window: usize) -> Self {
        let window = window.max(1);
        let rounded: Vec<f64> = daily
            .buckets()
            .iter()
            .map(|bucket| bucket.pages.round_ties_even())
            .collect();

        let points = daily
            .buckets()
            .iter()
            .enumerate()
            .map(|(index, bucket)| {
                let from = (index + 1).saturating_sub(window);
                let observed = &rounded[from..=index];
                #[allow(clippy::cast_precision_loss)]
                let rolling_average = observed.iter().sum::<f64>() / observed.len() as f64;

                RollingPoint {
                    date: bucket.date,
                    pages: rounded[index],
                    titles: bucket.titles.join(TITLE_SEPARATOR),
                    rolling_average,
                }
            })
            .collect();

        Self { window, points }
    }

    /// Window length actually used.
    pub const fn window(&self) -> usize {
        self.window
    }

    /// All points in date order.
    pub fn points(&self) -> &[RollingPoint] {
        &self.points
    }

    /// Number of days covered.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no day is covered.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point, if any.
    pub fn first(&self) -> Option<&RollingPoint> {
        self.points.first()
    }

    /// Last point, if any.
    pub fn last(&self) -> Option<&RollingPoint> {
        self.points.last()
    }

    /// Position of a day within the series.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let first = self.first()?.date;
        let offset = usize::try_from((date - first).num_days()).ok()?;
        (offset < self.points.len()).then_some(offset)
    }

    /// Point for a given day, if covered.
    pub fn get(&self, date: NaiveDate) -> Option<&RollingPoint> {
        self.index_of(date).map(|index| &self.points[index])
    }
}

/// Build the smoothed per-day reading series from rows ordered by end date.
pub fn interpolate_pages_over_time(rows: &[ReadingRow], window: usize) -> RollingSeries {
    let daily = DailySeries::from_rows(rows);
    let series = RollingSeries::from_daily(&daily, window);
    debug!(
        days = series.len(),
        window = series.window(),
        "Interpolated reading series"
    );
    series
}

fn day_offset(first: NaiveDate, date: NaiveDate) -> usize {
    usize::try_from((date - first).num_days()).unwrap_or(0)
}
