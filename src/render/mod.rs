mod braille;
mod cell_buffer;
mod primitives;

pub use braille::{BrailleCanvas, X_BRAILLE_MULTIPLIER, Y_BRAILLE_MULTIPLIER, braille_point};
pub use cell_buffer::CellBuffer;
pub use primitives::{Cell, Color, symbols};

use crate::core::{CellPoint, CellRect};

/// Contract implemented by any character surface the chart draws into.
///
/// The chart only writes inside the rectangle it was handed; implementations
/// still ignore writes outside `area` so a bad layout can never panic.
pub trait Surface {
    fn area(&self) -> CellRect;

    fn set_cell(&mut self, point: CellPoint, cell: Cell);

    /// Writes `text` left to right starting at `point`, one char per cell.
    fn set_string(&mut self, text: &str, point: CellPoint, fg: Color) {
        let area = self.area();
        for (offset, symbol) in text.chars().enumerate() {
            let Ok(offset) = i32::try_from(offset) else {
                break;
            };
            let target = CellPoint::new(point.x.saturating_add(offset), point.y);
            if target.x >= area.max_x {
                break;
            }
            if area.contains(target) {
                self.set_cell(target, Cell::new(symbol, fg));
            }
        }
    }
}

#[cfg(feature = "ratatui-backend")]
mod ratatui_backend;
