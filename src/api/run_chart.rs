use std::sync::Arc;

use chrono::TimeDelta;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::core::{
    CellRect, ChartGrid, Clock, SystemClock, TimeRange, TimeSeriesStore, time_to_column,
    timescale,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::DiagnosticsSink;
use crate::interaction::{SelectionController, SelectionMode};
use crate::render::{Color, Surface};

use super::axis_renderer::{TIME_LABEL_HEIGHT, render_axes};
use super::grid_builder::build_grid;
use super::legend_renderer::render_legend;
use super::line_renderer::render_lines;
use super::{FrameSummary, RunChartConfig};

/// Mutable chart state; only ever touched through `RunChart::state`.
pub(super) struct RunChartState {
    pub(super) store: TimeSeriesStore,
    pub(super) grid: ChartGrid,
    pub(super) selection: SelectionController,
    pub(super) diagnostics: Option<Box<dyn DiagnosticsSink>>,
}

/// Real-time run chart: sliding-window history of labeled series drawn as
/// braille polylines, with a live/pinpoint selection cursor.
///
/// Every public operation holds one exclusive lock for its whole duration, so
/// producers on other threads can share the chart through `Arc` while a
/// single render loop calls `draw`.
pub struct RunChart {
    pub(super) config: RunChartConfig,
    pub(super) timescale: TimeDelta,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) state: Mutex<RunChartState>,
}

impl RunChart {
    /// Creates an empty chart driven by the wall clock.
    pub fn new(config: RunChartConfig) -> ChartResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates an empty chart reading time from `clock`.
    pub fn with_clock(config: RunChartConfig, clock: Arc<dyn Clock>) -> ChartResult<Self> {
        config.validate()?;

        let timescale = timescale(config.refresh_rate_ms);
        let reserve = TimeDelta::minutes(i64::from(config.retention_reserve_minutes));
        let grid = ChartGrid::initial(clock.now(), timescale);
        debug!(
            title = %config.title,
            refresh_rate_ms = config.refresh_rate_ms,
            timescale_secs = timescale.num_seconds(),
            "create run chart"
        );

        Ok(Self {
            config,
            timescale,
            clock,
            state: Mutex::new(RunChartState {
                store: TimeSeriesStore::new(reserve),
                grid,
                selection: SelectionController::default(),
                diagnostics: None,
            }),
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.config.title
    }

    #[must_use]
    pub fn config(&self) -> &RunChartConfig {
        &self.config
    }

    /// Duration between two vertical grid lines.
    #[must_use]
    pub fn timescale(&self) -> TimeDelta {
        self.timescale
    }

    /// Registers a series. Samples for unregistered labels are dropped.
    pub fn add_line(&self, label: impl Into<String>, color: Color) -> ChartResult<()> {
        self.state.lock().store.add_line(label, color)
    }

    /// Installs the receiver for dropped-sample diagnostics.
    pub fn set_diagnostics_sink(&self, sink: impl DiagnosticsSink + 'static) {
        self.state.lock().diagnostics = Some(Box::new(sink));
    }

    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.state.lock().selection.mode()
    }

    /// Visible window of the last draw.
    #[must_use]
    pub fn visible_time_range(&self) -> TimeRange {
        self.state.lock().grid.time_range
    }

    /// Runs a retention pass against the window of the last draw.
    pub fn trim_stale(&self) -> usize {
        let mut state = self.state.lock();
        let visible_min = state.grid.time_range.min;
        state.store.trim_stale(visible_min)
    }

    /// Renders one frame into `surface`.
    ///
    /// `area` is the panel's inner rectangle (inside its border); the chart
    /// reserves a left margin for value labels and a bottom margin for time
    /// labels. Fails only when `area` has no room for a plot at all.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        area: CellRect,
    ) -> ChartResult<FrameSummary> {
        if area.width() < 2 || area.height() <= TIME_LABEL_HEIGHT + 1 {
            return Err(ChartError::InvalidArea {
                width: area.width(),
                height: area.height(),
            });
        }

        let mut state = self.state.lock();
        let state = &mut *state;
        let now = self.clock.now();
        state.grid = build_grid(state, area, now, self.timescale, self.config.precision);
        let grid = state.grid;

        let draw_area = CellRect::new(
            area.min_x + grid.min_time_width + 1,
            area.min_y,
            area.max_x,
            area.max_y - TIME_LABEL_HEIGHT - 1,
        );

        let cursor_column = state
            .selection
            .cursor()
            .map(|cursor| time_to_column(cursor, &grid));

        render_axes(surface, area, &grid, self.config.precision);
        let lines = if draw_area.is_empty() {
            Vec::new()
        } else {
            render_lines(
                surface,
                &mut state.store,
                &grid,
                draw_area,
                cursor_column,
            )
        };
        render_legend(
            surface,
            &state.store,
            area,
            self.config.legend,
            state.selection.mode(),
            self.config.precision,
        );

        trace!(
            lines = lines.len(),
            mode = ?state.selection.mode(),
            "draw frame"
        );
        Ok(FrameSummary {
            draw_area,
            time_range: grid.time_range,
            value_extrema: grid.value_extrema,
            cursor_column,
            lines,
        })
    }
}
