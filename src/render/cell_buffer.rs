use crate::core::{CellPoint, CellRect};
use crate::render::{Cell, Surface};

/// In-memory character surface used by tests and headless hosts.
///
/// Cells outside `area` are silently ignored, mirroring what a terminal
/// buffer does with off-screen writes.
#[derive(Debug, Clone, PartialEq)]
pub struct CellBuffer {
    area: CellRect,
    cells: Vec<Cell>,
}

impl CellBuffer {
    #[must_use]
    pub fn new(area: CellRect) -> Self {
        let len = usize::try_from(area.width().max(0)).unwrap_or(0)
            * usize::try_from(area.height().max(0)).unwrap_or(0);
        Self {
            area,
            cells: vec![Cell::default(); len],
        }
    }

    #[must_use]
    pub fn get(&self, point: CellPoint) -> Option<Cell> {
        self.index_of(point).map(|index| self.cells[index])
    }

    /// Text of one row, trailing blanks included.
    #[must_use]
    pub fn row_text(&self, y: i32) -> String {
        (self.area.min_x..self.area.max_x)
            .filter_map(|x| self.get(CellPoint::new(x, y)))
            .map(|cell| cell.symbol)
            .collect()
    }

    /// Every row as text, top to bottom.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        (self.area.min_y..self.area.max_y)
            .map(|y| self.row_text(y))
            .collect()
    }

    /// Points whose glyph equals `symbol`, row-major.
    #[must_use]
    pub fn find(&self, symbol: char) -> Vec<CellPoint> {
        let mut found = Vec::new();
        for y in self.area.min_y..self.area.max_y {
            for x in self.area.min_x..self.area.max_x {
                let point = CellPoint::new(x, y);
                if self.get(point).is_some_and(|cell| cell.symbol == symbol) {
                    found.push(point);
                }
            }
        }
        found
    }

    pub fn reset(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn index_of(&self, point: CellPoint) -> Option<usize> {
        if !self.area.contains(point) {
            return None;
        }
        let column = usize::try_from(point.x - self.area.min_x).ok()?;
        let row = usize::try_from(point.y - self.area.min_y).ok()?;
        let width = usize::try_from(self.area.width()).ok()?;
        Some(row * width + column)
    }
}

impl Surface for CellBuffer {
    fn area(&self) -> CellRect {
        self.area
    }

    fn set_cell(&mut self, point: CellPoint, cell: Cell) {
        if let Some(index) = self.index_of(point) {
            self.cells[index] = cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;

    #[test]
    fn writes_outside_area_are_ignored() {
        let mut buffer = CellBuffer::new(CellRect::from_size(0, 0, 4, 2));
        buffer.set_cell(CellPoint::new(9, 9), Cell::new('x', Color::WHITE));
        buffer.set_string("abcdef", CellPoint::new(1, 1), Color::WHITE);

        assert_eq!(buffer.to_lines(), vec!["    ".to_owned(), " abc".to_owned()]);
    }
}
