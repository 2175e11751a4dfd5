use indexmap::IndexMap;

use crate::core::{CellPoint, CellRect};
use crate::render::{Cell, Color, Surface, symbols};

/// Braille dots per cell horizontally.
pub const X_BRAILLE_MULTIPLIER: i32 = 2;
/// Braille dots per cell vertically.
pub const Y_BRAILLE_MULTIPLIER: i32 = 4;

// Dot bit for (row, column) inside one braille cell.
const DOT_BITS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// Converts a cell position to the top-left dot of that cell.
#[must_use]
pub const fn braille_point(point: CellPoint) -> CellPoint {
    CellPoint::new(point.x * X_BRAILLE_MULTIPLIER, point.y * Y_BRAILLE_MULTIPLIER)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BrailleCell {
    bits: u8,
    color: Color,
}

/// Sub-cell line canvas in braille resolution.
///
/// Coordinates passed to `line` are dot coordinates (see `braille_point`).
/// Only cells inside `rect` are flushed to the surface. The last line touching
/// a cell decides its color.
#[derive(Debug, Clone)]
pub struct BrailleCanvas {
    rect: CellRect,
    cells: IndexMap<CellPoint, BrailleCell>,
}

impl BrailleCanvas {
    #[must_use]
    pub fn new(rect: CellRect) -> Self {
        Self {
            rect,
            cells: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn rect(&self) -> CellRect {
        self.rect
    }

    /// Raises one dot.
    pub fn set_dot(&mut self, dot: CellPoint, color: Color) {
        let cell = CellPoint::new(
            dot.x.div_euclid(X_BRAILLE_MULTIPLIER),
            dot.y.div_euclid(Y_BRAILLE_MULTIPLIER),
        );
        if !self.rect.contains(cell) {
            return;
        }
        let bit = DOT_BITS[dot.y.rem_euclid(Y_BRAILLE_MULTIPLIER) as usize]
            [dot.x.rem_euclid(X_BRAILLE_MULTIPLIER) as usize];
        let entry = self
            .cells
            .entry(cell)
            .or_insert(BrailleCell { bits: 0, color });
        entry.bits |= bit;
        entry.color = color;
    }

    /// Rasterizes a straight segment between two dots (Bresenham).
    pub fn line(&mut self, from: CellPoint, to: CellPoint, color: Color) {
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let step_x = if from.x < to.x { 1 } else { -1 };
        let step_y = if from.y < to.y { 1 } else { -1 };
        let mut error = dx + dy;
        let mut current = from;

        loop {
            self.set_dot(current, color);
            if current == to {
                break;
            }
            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                current.x += step_x;
            }
            if doubled <= dx {
                error += dx;
                current.y += step_y;
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Writes every touched cell as a braille glyph.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for (point, cell) in &self.cells {
            let symbol = char::from_u32(symbols::BRAILLE_BLANK + u32::from(cell.bits))
                .unwrap_or(' ');
            surface.set_cell(*point, Cell::new(symbol, cell.color));
        }
    }
}
