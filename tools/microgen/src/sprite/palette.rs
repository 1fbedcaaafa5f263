//! Symbol -> color lookup tables for ASCII sprite art

use super::Rgba;
use std::collections::HashMap;

/// Fully transparent black
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Returned for symbols a palette does not define, so typos stand out
pub const MISSING: Rgba = [255, 0, 255, 255];

/// Industrial hazard scheme: neon green, dark greys, hazard yellow
const HAZARD: &[(char, Rgba)] = &[
    (' ', TRANSPARENT),
    ('.', [30, 30, 30, 255]),    // floor background
    ('G', [60, 60, 60, 255]),    // metal grey
    ('D', [40, 40, 40, 255]),    // darker metal
    ('K', [10, 10, 10, 255]),    // outline
    ('Y', [255, 200, 0, 255]),   // hazard yellow
    ('N', [57, 255, 20, 255]),   // neon green
    ('W', [220, 220, 220, 255]), // highlight
];

/// Maps single-character art symbols to colors
#[derive(Debug, Clone, Default)]
pub struct Palette {
    entries: HashMap<char, Rgba>,
}

impl Palette {
    pub fn new(entries: &[(char, Rgba)]) -> Self {
        Self {
            entries: entries.iter().copied().collect(),
        }
    }

    /// Palette used by the Micro Sokoban tiles
    pub fn hazard() -> Self {
        Self::new(HAZARD)
    }

    /// Add or replace a symbol
    pub fn with(mut self, symbol: char, color: Rgba) -> Self {
        self.entries.insert(symbol, color);
        self
    }

    /// Color for `symbol`, or [`MISSING`] if undefined
    pub fn get(&self, symbol: char) -> Rgba {
        self.entries.get(&symbol).copied().unwrap_or(MISSING)
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.entries.contains_key(&symbol)
    }
}
