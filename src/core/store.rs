use chrono::{DateTime, TimeDelta, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::mapper::{ChartGrid, ValueExtrema, time_to_column};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Appends per line between two retention passes.
pub const TRIM_INTERVAL_APPENDS: u64 = 100;
/// Lookback kept beyond the visible window so scrolling never exposes gaps.
pub const DEFAULT_RETENTION_RESERVE_MINUTES: i64 = 20;

/// One stored sample.
///
/// `column` is relative to the grid that was current when the point was
/// appended; the line renderer shifts it as the window scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub column: i32,
}

/// History and selection anchor of one named series.
#[derive(Debug, Clone)]
pub struct TimeLine {
    label: String,
    color: Color,
    points: Vec<TimePoint>,
    extrema: ValueExtrema,
    appended: u64,
    pub(crate) selection_column: Option<i32>,
    pub(crate) selection_point: Option<TimePoint>,
}

impl TimeLine {
    #[must_use]
    pub fn new(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
            points: Vec::new(),
            extrema: ValueExtrema::empty(),
            appended: 0,
            selection_column: None,
            selection_point: None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Retained points, oldest first.
    #[must_use]
    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    #[must_use]
    pub fn extrema(&self) -> ValueExtrema {
        self.extrema
    }

    /// Total number of samples ever appended, including trimmed ones.
    #[must_use]
    pub fn appended(&self) -> u64 {
        self.appended
    }

    /// Column anchored for the current pinpoint session, if any.
    #[must_use]
    pub fn selection_column(&self) -> Option<i32> {
        self.selection_column
    }

    #[must_use]
    pub fn selection_point(&self) -> Option<TimePoint> {
        self.selection_point
    }

    #[must_use]
    pub fn last_value(&self) -> Option<f64> {
        self.points.last().map(|point| point.value)
    }

    /// Difference between the two most recent values.
    #[must_use]
    pub fn last_delta(&self) -> Option<f64> {
        match self.points.as_slice() {
            [.., previous, last] => Some(last.value - previous.value),
            _ => None,
        }
    }

    pub(crate) fn points_mut(&mut self) -> &mut [TimePoint] {
        &mut self.points
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection_column = None;
    }

    fn push(&mut self, value: f64, timestamp: DateTime<Utc>, grid: &ChartGrid) {
        // Producers may race on the clock; keep arrival order monotonic.
        let timestamp = match self.points.last() {
            Some(last) if timestamp < last.timestamp => last.timestamp,
            _ => timestamp,
        };
        self.extrema.include(value);
        self.points.push(TimePoint {
            value,
            timestamp,
            column: time_to_column(timestamp, grid),
        });
        self.appended += 1;
    }

    /// Evicts every point up to and including the last one strictly older
    /// than `floor`, in one bulk drain.
    fn trim_before(&mut self, floor: DateTime<Utc>) -> usize {
        let stale = self.points.partition_point(|point| point.timestamp < floor);
        if stale == 0 {
            return 0;
        }

        self.points.drain(..stale);
        self.extrema = ValueExtrema::empty();
        for point in &self.points {
            self.extrema.include(point.value);
        }
        stale
    }
}

/// Result of a successful append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendReport {
    pub points_len: usize,
    /// Points evicted when the append triggered a retention pass.
    pub trimmed: Option<usize>,
}

/// Per-series sliding-window history.
///
/// Lines keep their registration order, which is also the draw and legend
/// order.
#[derive(Debug, Clone)]
pub struct TimeSeriesStore {
    lines: IndexMap<String, TimeLine>,
    retention_reserve: TimeDelta,
}

impl Default for TimeSeriesStore {
    fn default() -> Self {
        Self::new(TimeDelta::minutes(DEFAULT_RETENTION_RESERVE_MINUTES))
    }
}

impl TimeSeriesStore {
    #[must_use]
    pub fn new(retention_reserve: TimeDelta) -> Self {
        Self {
            lines: IndexMap::new(),
            retention_reserve,
        }
    }

    #[must_use]
    pub fn retention_reserve(&self) -> TimeDelta {
        self.retention_reserve
    }

    pub fn add_line(&mut self, label: impl Into<String>, color: Color) -> ChartResult<()> {
        let label = label.into();
        if self.lines.contains_key(&label) {
            return Err(ChartError::DuplicateLine(label));
        }
        debug!(label = %label, "register line");
        self.lines.insert(label.clone(), TimeLine::new(label, color));
        Ok(())
    }

    #[must_use]
    pub fn line(&self, label: &str) -> Option<&TimeLine> {
        self.lines.get(label)
    }

    pub fn lines(&self) -> impl Iterator<Item = &TimeLine> {
        self.lines.values()
    }

    pub(crate) fn lines_mut(&mut self) -> impl Iterator<Item = &mut TimeLine> {
        self.lines.values_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appends one value stamped with `timestamp`.
    ///
    /// The column is computed against `grid`, the grid of the last draw.
    /// Returns `None` when `label` was never registered; nothing is stored.
    /// Every `TRIM_INTERVAL_APPENDS`th append to a line runs a retention pass
    /// over all lines.
    pub fn append(
        &mut self,
        label: &str,
        value: f64,
        timestamp: DateTime<Utc>,
        grid: &ChartGrid,
    ) -> Option<AppendReport> {
        let line = self.lines.get_mut(label)?;
        line.push(value, timestamp, grid);
        let points_len = line.points.len();
        trace!(label, points_len, value, "append point");

        let trimmed = (line.appended % TRIM_INTERVAL_APPENDS == 0)
            .then(|| self.trim_stale(grid.time_range.min));
        Some(AppendReport {
            points_len: self.lines.get(label).map_or(points_len, |line| line.points.len()),
            trimmed,
        })
    }

    /// Drops points older than `visible_min - retention_reserve` from every
    /// line. Returns the number of evicted points.
    pub fn trim_stale(&mut self, visible_min: DateTime<Utc>) -> usize {
        let floor = visible_min - self.retention_reserve;
        let evicted: usize = self
            .lines
            .values_mut()
            .map(|line| line.trim_before(floor))
            .sum();
        debug!(evicted, floor = %floor, "trim stale points");
        evicted
    }
}
