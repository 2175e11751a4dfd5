use serde::{Deserialize, Serialize};

use crate::core::{CellPoint, CellRect, TimePoint, TimeRange, ValueExtrema};

/// Cells one series occupied in a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTrace {
    pub label: String,
    /// Polyline vertices in draw order, one per column.
    pub points: Vec<CellPoint>,
    /// Selection marker cell while pinpointing.
    pub selection: Option<CellPoint>,
    /// Sample under the selection marker.
    pub selection_point: Option<TimePoint>,
}

impl LineTrace {
    /// Distinct columns covered by the polyline.
    #[must_use]
    pub fn columns(&self) -> Vec<i32> {
        self.points.iter().map(|point| point.x).collect()
    }
}

/// What `RunChart::draw` produced, for hosts and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSummary {
    pub draw_area: CellRect,
    pub time_range: TimeRange,
    pub value_extrema: ValueExtrema,
    /// Column of the pinpoint cursor; `None` while live.
    pub cursor_column: Option<i32>,
    pub lines: Vec<LineTrace>,
}

impl FrameSummary {
    #[must_use]
    pub fn line(&self, label: &str) -> Option<&LineTrace> {
        self.lines.iter().find(|line| line.label == label)
    }
}
