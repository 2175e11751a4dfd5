use ratatui::buffer::Buffer;
use ratatui::style::Color as TermColor;

use crate::core::{CellPoint, CellRect};
use crate::render::{Cell, Color, Surface};

impl From<Color> for TermColor {
    fn from(color: Color) -> Self {
        TermColor::Rgb(color.red, color.green, color.blue)
    }
}

/// Lets the chart draw straight into a ratatui frame buffer.
impl Surface for Buffer {
    fn area(&self) -> CellRect {
        let area = self.area;
        CellRect::from_size(
            i32::from(area.x),
            i32::from(area.y),
            i32::from(area.width),
            i32::from(area.height),
        )
    }

    fn set_cell(&mut self, point: CellPoint, cell: Cell) {
        let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) else {
            return;
        };
        if let Some(target) = self.cell_mut((x, y)) {
            target.set_char(cell.symbol);
            target.set_fg(cell.fg.into());
        }
    }
}
