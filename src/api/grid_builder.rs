use chrono::{DateTime, TimeDelta, Utc};

use crate::core::{
    CellRect, ChartGrid, GRID_WIDTH, TimeSeriesStore, format_value, live_time_range,
    visible_extrema,
};

use super::run_chart::RunChartState;

/// Derives the grid for one draw.
///
/// Live mode anchors the window at `now`; pinpoint mode keeps the previous
/// window so the cursor stays over the same instant.
pub(super) fn build_grid(
    state: &RunChartState,
    area: CellRect,
    now: DateTime<Utc>,
    timescale: TimeDelta,
    precision: usize,
) -> ChartGrid {
    let min_time_width = max_value_label_width(&state.store, precision);
    let lines_count = ((area.width() - min_time_width) / GRID_WIDTH).max(0);
    let time_range = if state.selection.is_pinpoint() {
        state.grid.time_range
    } else {
        live_time_range(now, lines_count, timescale)
    };
    let value_extrema = visible_extrema(
        state
            .store
            .lines()
            .flat_map(|line| line.points().iter().map(|point| (point.value, point.timestamp))),
        time_range,
    );

    ChartGrid {
        time_range,
        timescale,
        time_per_column: timescale / GRID_WIDTH,
        value_extrema,
        lines_count,
        max_time_width: area.max_x,
        min_time_width,
    }
}

/// Widest formatted value among all retained points.
///
/// Label width grows with magnitude on each side of zero, so the widest label
/// always belongs to a line's minimum or maximum.
fn max_value_label_width(store: &TimeSeriesStore, precision: usize) -> i32 {
    store
        .lines()
        .filter(|line| !line.points().is_empty())
        .flat_map(|line| {
            let extrema = line.extrema();
            [extrema.min, extrema.max]
        })
        .map(|value| format_value(value, precision).chars().count())
        .max()
        .map_or(0, |width| i32::try_from(width).unwrap_or(i32::MAX))
}
