use serde::{Deserialize, Serialize};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const DARK_GREY: Self = Self::rgb(88, 88, 88);
    pub const RED: Self = Self::rgb(220, 50, 47);
    pub const GREEN: Self = Self::rgb(133, 153, 0);
    pub const YELLOW: Self = Self::rgb(181, 137, 0);
    pub const BLUE: Self = Self::rgb(38, 139, 210);
    pub const MAGENTA: Self = Self::rgb(211, 54, 130);
    pub const CYAN: Self = Self::rgb(42, 161, 152);

    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// One character cell: glyph plus foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub symbol: char,
    pub fg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ', Color::WHITE)
    }
}

impl Cell {
    #[must_use]
    pub const fn new(symbol: char, fg: Color) -> Self {
        Self { symbol, fg }
    }
}

/// Glyphs used by the chart chrome.
pub mod symbols {
    pub const BOTTOM_LEFT: char = '└';
    pub const HORIZONTAL_DASH: char = '┈';
    pub const VERTICAL_DASH: char = '┊';
    pub const SELECTION: char = '▲';
    pub const DOT: char = '•';
    /// First codepoint of the Unicode braille block (no dots raised).
    pub const BRAILLE_BLANK: u32 = 0x2800;
}
