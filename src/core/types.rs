use serde::{Deserialize, Serialize};

/// Position of one terminal cell (or one sub-cell dot, depending on context).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPoint {
    pub x: i32,
    pub y: i32,
}

impl CellPoint {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Half-open cell rectangle: `min` is inclusive, `max` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl CellRect {
    #[must_use]
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Builds a rectangle from an origin and a size.
    #[must_use]
    pub const fn from_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    #[must_use]
    pub const fn width(self) -> i32 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub const fn height(self) -> i32 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    #[must_use]
    pub const fn contains(self, point: CellPoint) -> bool {
        point.x >= self.min_x && point.x < self.max_x && point.y >= self.min_y && point.y < self.max_y
    }
}
