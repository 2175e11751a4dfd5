use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::TimeRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Window follows "now"; no cursor.
    #[default]
    Live,
    /// Window is frozen and a cursor marks one instant.
    Pinpoint,
}

/// Outcome of a selection input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionTransition {
    Entered,
    Moved,
    Exited,
    Unchanged,
}

impl SelectionTransition {
    /// Whether per-line anchors must be recomputed against the new cursor.
    #[must_use]
    pub fn resets_anchors(self) -> bool {
        matches!(self, Self::Entered | Self::Moved)
    }
}

/// Live/pinpoint state machine driving the selection cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionController {
    mode: SelectionMode,
    cursor: Option<DateTime<Utc>>,
}

impl SelectionController {
    #[must_use]
    pub fn mode(self) -> SelectionMode {
        self.mode
    }

    #[must_use]
    pub fn is_pinpoint(self) -> bool {
        self.mode == SelectionMode::Pinpoint
    }

    /// Cursor instant; `None` while live.
    #[must_use]
    pub fn cursor(self) -> Option<DateTime<Utc>> {
        self.cursor
    }

    /// Enters pinpoint mode at the middle of `visible`, or shifts the cursor
    /// by `shift` columns and clamps it to `visible`.
    pub fn move_selection(
        &mut self,
        shift: i32,
        visible: TimeRange,
        time_per_column: TimeDelta,
    ) -> SelectionTransition {
        match (self.mode, self.cursor) {
            (SelectionMode::Pinpoint, Some(cursor)) => {
                let shifted = time_per_column
                    .checked_mul(shift)
                    .and_then(|delta| cursor.checked_add_signed(delta))
                    .unwrap_or(if shift < 0 { visible.min } else { visible.max });
                self.cursor = Some(visible.clamp(shifted));
                SelectionTransition::Moved
            }
            _ => {
                self.mode = SelectionMode::Pinpoint;
                self.cursor = Some(visible.midpoint());
                SelectionTransition::Entered
            }
        }
    }

    /// Returns to live mode. No-op while already live.
    pub fn disable(&mut self) -> SelectionTransition {
        if self.mode == SelectionMode::Live {
            return SelectionTransition::Unchanged;
        }
        self.mode = SelectionMode::Live;
        self.cursor = None;
        SelectionTransition::Exited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn range() -> TimeRange {
        let min = Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid instant");
        TimeRange::new(min, min + TimeDelta::seconds(60))
    }

    #[test]
    fn first_move_enters_at_midpoint_regardless_of_shift() {
        let mut selection = SelectionController::default();
        let transition = selection.move_selection(7, range(), TimeDelta::milliseconds(500));

        assert_eq!(transition, SelectionTransition::Entered);
        assert_eq!(selection.mode(), SelectionMode::Pinpoint);
        assert_eq!(selection.cursor(), Some(range().midpoint()));
    }

    #[test]
    fn moves_are_clamped_to_the_visible_range() {
        let mut selection = SelectionController::default();
        selection.move_selection(0, range(), TimeDelta::seconds(1));

        selection.move_selection(-1_000, range(), TimeDelta::seconds(1));
        assert_eq!(selection.cursor(), Some(range().min));
        selection.move_selection(i32::MAX, range(), TimeDelta::seconds(1));
        assert_eq!(selection.cursor(), Some(range().max));
    }

    #[test]
    fn disable_is_a_no_op_while_live() {
        let mut selection = SelectionController::default();
        assert_eq!(selection.disable(), SelectionTransition::Unchanged);

        selection.move_selection(0, range(), TimeDelta::seconds(1));
        assert_eq!(selection.disable(), SelectionTransition::Exited);
        assert_eq!(selection.cursor(), None);
    }
}
