//! Pure time/value to cell mapping for the run chart grid.
//!
//! Horizontal density is fixed by the timescale: one vertical grid division
//! spans `GRID_WIDTH` columns and covers one `timescale` worth of time, so the
//! right edge of the chart is always "now" (or the frozen pinpoint instant).

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Width in columns of one time label.
pub const TIME_LABEL_WIDTH: i32 = 8;
/// Gap in columns between neighbouring time labels.
pub const TIME_LABEL_INDENT: i32 = 2;
/// Columns between two vertical grid lines.
pub const GRID_WIDTH: i32 = TIME_LABEL_INDENT + TIME_LABEL_WIDTH;

/// Visible time window, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub min: DateTime<Utc>,
    pub max: DateTime<Utc>,
}

impl TimeRange {
    #[must_use]
    pub fn new(min: DateTime<Utc>, max: DateTime<Utc>) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    #[must_use]
    pub fn span(self) -> TimeDelta {
        self.max - self.min
    }

    #[must_use]
    pub fn contains(self, instant: DateTime<Utc>) -> bool {
        instant >= self.min && instant <= self.max
    }

    #[must_use]
    pub fn midpoint(self) -> DateTime<Utc> {
        self.max - self.span() / 2
    }

    #[must_use]
    pub fn clamp(self, instant: DateTime<Utc>) -> DateTime<Utc> {
        instant.clamp(self.min, self.max)
    }
}

/// Running `[min, max]` bounds of a set of values.
///
/// The empty state is `{min: +inf, max: -inf}` so the first included value
/// sets both bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueExtrema {
    pub min: f64,
    pub max: f64,
}

impl Default for ValueExtrema {
    fn default() -> Self {
        Self::empty()
    }
}

impl ValueExtrema {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    #[must_use]
    pub const fn flat(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn include(&mut self, value: f64) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.min > self.max
    }

    #[must_use]
    pub fn is_flat(self) -> bool {
        self.min == self.max
    }
}

/// Layout and range snapshot derived once per draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGrid {
    pub time_range: TimeRange,
    pub timescale: TimeDelta,
    pub time_per_column: TimeDelta,
    pub value_extrema: ValueExtrema,
    /// Number of vertical grid lines that fit in the plot.
    pub lines_count: i32,
    /// Column of the right plot edge; maps to `time_range.max`.
    pub max_time_width: i32,
    /// Width of the value label margin on the left.
    pub min_time_width: i32,
}

impl ChartGrid {
    /// Grid used before the first draw: zero-width window ending at `now`.
    #[must_use]
    pub fn initial(now: DateTime<Utc>, timescale: TimeDelta) -> Self {
        Self {
            time_range: TimeRange::new(now, now),
            timescale,
            time_per_column: timescale / GRID_WIDTH,
            value_extrema: ValueExtrema::flat(0.0),
            lines_count: 0,
            max_time_width: 0,
            min_time_width: 0,
        }
    }
}

/// Duration covered by one grid division.
///
/// `refresh_rate_ms * GRID_WIDTH / 2`, rounded to whole seconds, never below
/// one second.
#[must_use]
pub fn timescale(refresh_rate_ms: u64) -> TimeDelta {
    let multiplier_ms = refresh_rate_ms.saturating_mul(GRID_WIDTH as u64) / 2;
    let seconds = multiplier_ms.saturating_add(500) / 1_000;
    let seconds = i64::try_from(seconds).unwrap_or(i64::MAX).clamp(1, MAX_TIMESCALE_SECONDS);
    TimeDelta::seconds(seconds)
}

const MAX_TIMESCALE_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Live window ending at `now` and spanning `lines_count` grid divisions.
#[must_use]
pub fn live_time_range(now: DateTime<Utc>, lines_count: i32, timescale: TimeDelta) -> TimeRange {
    let width = timescale * lines_count.max(0);
    TimeRange::new(now - width, now)
}

/// Maps a timestamp to a cell column. Non-decreasing in `instant`.
#[must_use]
pub fn time_to_column(instant: DateTime<Utc>, grid: &ChartGrid) -> i32 {
    let relation = delta_nanos(grid.time_range.max - instant) / delta_nanos(grid.timescale).max(1.0);
    let offset = (f64::from(GRID_WIDTH) * relation).ceil() as i32;
    grid.max_time_width.saturating_sub(offset)
}

/// Maps a value to a row counted upwards from the bottom of the draw area.
///
/// Flat and empty ranges centre the row; heights of two rows or fewer have no
/// usable span and map everything to row 0. Values outside `extrema` clamp to
/// `-1..=draw_height`, one row past either edge of the draw area.
#[must_use]
pub fn value_to_row(value: f64, extrema: ValueExtrema, draw_height: i32) -> i32 {
    let usable = draw_height - 2;
    if usable <= 0 {
        return 0;
    }
    if extrema.is_flat() || extrema.is_empty() {
        return usable / 2;
    }

    let value_per_row = (extrema.max - extrema.min) / f64::from(usable);
    let row = (value - extrema.min) / value_per_row;
    (row as i32).clamp(-1, draw_height)
}

/// Extrema over every point of every series that falls inside `range`.
///
/// Returns a flat range at zero when nothing is visible.
#[must_use]
pub fn visible_extrema<I>(points: I, range: TimeRange) -> ValueExtrema
where
    I: IntoIterator<Item = (f64, DateTime<Utc>)>,
{
    let mut extrema = ValueExtrema::empty();
    for (value, timestamp) in points {
        if range.contains(timestamp) {
            extrema.include(value);
        }
    }

    if extrema.is_empty() {
        ValueExtrema::flat(0.0)
    } else {
        extrema
    }
}

/// Formats a value with fixed precision; unbounded values render as `Inf`.
#[must_use]
pub fn format_value(value: f64, precision: usize) -> String {
    if !value.is_finite() || value.abs() == f64::MAX {
        "Inf".to_owned()
    } else {
        format!("{value:.precision$}")
    }
}

fn delta_nanos(delta: TimeDelta) -> f64 {
    delta
        .num_nanoseconds()
        .map_or_else(|| delta.num_milliseconds() as f64 * 1e6, |nanos| nanos as f64)
}
