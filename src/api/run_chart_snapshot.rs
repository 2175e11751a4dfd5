use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{TimeLine, TimePoint, TimeRange, ValueExtrema};
use crate::error::{ChartError, ChartResult};
use crate::interaction::SelectionMode;
use crate::render::Color;

use super::RunChart;

/// Per-line summary used by hosts (status bars, debug views).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStats {
    pub label: String,
    pub color: Color,
    pub points_len: usize,
    pub appended: u64,
    pub extrema: Option<ValueExtrema>,
    pub last_value: Option<f64>,
    pub last_delta: Option<f64>,
    pub selection_point: Option<TimePoint>,
}

impl LineStats {
    fn from_line(line: &TimeLine) -> Self {
        Self {
            label: line.label().to_owned(),
            color: line.color(),
            points_len: line.points().len(),
            appended: line.appended(),
            extrema: (!line.points().is_empty()).then(|| line.extrema()),
            last_value: line.last_value(),
            last_delta: line.last_delta(),
            selection_point: line.selection_point(),
        }
    }
}

/// Serializable chart state snapshot used by regression tests and debugging
/// tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunChartSnapshot {
    pub title: String,
    pub mode: SelectionMode,
    pub cursor: Option<DateTime<Utc>>,
    pub visible_range: TimeRange,
    pub lines: Vec<LineStats>,
}

impl RunChart {
    #[must_use]
    pub fn line_stats(&self, label: &str) -> Option<LineStats> {
        self.state.lock().store.line(label).map(LineStats::from_line)
    }

    #[must_use]
    pub fn snapshot(&self) -> RunChartSnapshot {
        let state = self.state.lock();
        RunChartSnapshot {
            title: self.config.title.clone(),
            mode: state.selection.mode(),
            cursor: state.selection.cursor(),
            visible_range: state.grid.time_range,
            lines: state.store.lines().map(LineStats::from_line).collect(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
