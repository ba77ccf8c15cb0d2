// Palette - the 16 positional colors a theme is built from
//
// Slot roles follow the terminal convention wallust writes:
// - 0: background
// - 1-6: red, green, yellow, blue, magenta, cyan
// - 7: foreground
// - 8: bright black (comments, muted chrome)
// - 9-15: bright variants of 1-7

mod color;
mod named;

pub use color::{Color, ColorError};

use std::ops::Index;

/// Number of colors in a palette
pub const PALETTE_SIZE: usize = 16;

/// Slot replaced by `special.background` from the sidecar
pub const BACKGROUND_SLOT: usize = 0;

/// Slot replaced by `special.foreground` from the sidecar
pub const FOREGROUND_SLOT: usize = 7;

/// Ordered set of exactly 16 colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette([Color; PALETTE_SIZE]);

impl Palette {
    pub fn colors(&self) -> &[Color; PALETTE_SIZE] {
        &self.0
    }

    pub fn background(&self) -> Color {
        self.0[BACKGROUND_SLOT]
    }

    pub fn foreground(&self) -> Color {
        self.0[FOREGROUND_SLOT]
    }

    pub fn set_background(&mut self, color: Color) {
        self.0[BACKGROUND_SLOT] = color;
    }

    pub fn set_foreground(&mut self, color: Color) {
        self.0[FOREGROUND_SLOT] = color;
    }
}

impl Index<usize> for Palette {
    type Output = Color;

    fn index(&self, index: usize) -> &Color {
        &self.0[index]
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = Vec<Color>;

    /// Succeeds only for exactly 16 colors; hands the vector back otherwise.
    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        <[Color; PALETTE_SIZE]>::try_from(colors).map(Self)
    }
}
