use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::interaction::SelectionTransition;

use super::RunChart;

/// Value of one series under the pinpoint cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionReport {
    pub label: String,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

impl RunChart {
    /// Enters pinpoint mode at the middle of the visible window, or moves the
    /// cursor by `shift` columns when already pinpointing.
    ///
    /// Either way every line re-anchors against the cursor on the next draw.
    pub fn move_selection(&self, shift: i32) -> SelectionTransition {
        let mut state = self.state.lock();
        let visible = state.grid.time_range;
        let time_per_column = state.grid.time_per_column;
        let transition = state
            .selection
            .move_selection(shift, visible, time_per_column);

        if transition.resets_anchors() {
            for line in state.store.lines_mut() {
                line.clear_selection();
            }
        }
        debug!(?transition, shift, cursor = ?state.selection.cursor(), "move selection");
        transition
    }

    /// Leaves pinpoint mode; the window resumes following "now".
    pub fn disable_selection(&self) -> SelectionTransition {
        let transition = self.state.lock().selection.disable();
        debug!(?transition, "disable selection");
        transition
    }

    /// Cursor instant while pinpointing.
    #[must_use]
    pub fn selection_time(&self) -> Option<DateTime<Utc>> {
        self.state.lock().selection.cursor()
    }

    /// Nearest sample of every anchored line, in registration order.
    ///
    /// Empty while live; lines anchor during the first draw after a move.
    #[must_use]
    pub fn selection_report(&self) -> Vec<SelectionReport> {
        let state = self.state.lock();
        if !state.selection.is_pinpoint() {
            return Vec::new();
        }

        state
            .store
            .lines()
            .filter(|line| line.selection_column().is_some())
            .filter_map(|line| {
                line.selection_point().map(|point| SelectionReport {
                    label: line.label().to_owned(),
                    value: point.value,
                    timestamp: point.timestamp,
                })
            })
            .collect()
    }
}
