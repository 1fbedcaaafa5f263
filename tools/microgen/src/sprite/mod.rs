//! Pixel-art sprite construction
//!
//! Sprites are built either from symbolic ASCII art (one palette symbol per cell)
//! or by drawing simple shapes on a transparent canvas, then upscaled with
//! nearest-neighbour replication and handed to the PNG encoder.
//!
//! # Example
//! ```
//! use microgen::sprite::{Palette, Sprite};
//!
//! let sprite = Sprite::from_ascii("N .\n. N", &Palette::hazard()).unwrap();
//! let big = sprite.upscale(4).unwrap();
//! assert_eq!((big.width(), big.height()), (8, 8));
//! ```

mod catalog;
mod palette;

pub use catalog::{SpriteGame, generate_sprites, pipe_sprites, sokoban_sprites};
pub use palette::{MISSING, Palette, TRANSPARENT};

use crate::png::{self, PngError};
use std::path::Path;

/// RGBA color, 8 bits per channel
pub type Rgba = [u8; 4];

/// Sprite construction errors
#[derive(Debug, thiserror::Error)]
pub enum SpriteError {
    #[error("sprite art contains no rows")]
    Empty,

    #[error("sprite row {row} is {found} cells wide, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("upscale factor must be at least 1")]
    ZeroScale,

    #[error("{width}x{height} sprite upscaled by {scale} does not fit in memory")]
    TooLarge { width: u32, height: u32, scale: u32 },

    #[error(transparent)]
    Png(#[from] PngError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Owned RGBA pixel buffer, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Sprite {
    /// Transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, TRANSPARENT)
    }

    /// Canvas filled with a single color
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Parse symbolic art: one row per line, cells separated by spaces.
    ///
    /// Blank lines are skipped and spaces are dropped, so `"K Y K"` and `"KYK"`
    /// describe the same three cells. Symbols missing from the palette become
    /// [`MISSING`] magenta.
    pub fn from_ascii(art: &str, palette: &Palette) -> Result<Self, SpriteError> {
        let rows: Vec<Vec<char>> = art
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let Some(first) = rows.first() else {
            return Err(SpriteError::Empty);
        };
        let width = first.len();

        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(SpriteError::RaggedRows {
                row,
                expected: width,
                found: cells.len(),
            });
        }

        let pixels = rows.iter().flatten().map(|&symbol| palette.get(symbol)).collect();

        Ok(Self {
            width: width as u32,
            height: rows.len() as u32,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixels, `width * height` entries
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get pixel at (x, y)
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Rgba {
        self.pixels[self.index(x, y)]
    }

    /// Set pixel at (x, y)
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Nearest-neighbour upscale: every pixel becomes a `scale x scale` block.
    pub fn upscale(&self, scale: u32) -> Result<Self, SpriteError> {
        if scale == 0 {
            return Err(SpriteError::ZeroScale);
        }

        let too_large = || SpriteError::TooLarge {
            width: self.width,
            height: self.height,
            scale,
        };
        let width = self.width.checked_mul(scale).ok_or_else(too_large)?;
        let height = self.height.checked_mul(scale).ok_or_else(too_large)?;
        let count = (width as usize)
            .checked_mul(height as usize)
            .filter(|n| n.checked_mul(size_of::<Rgba>()).is_some_and(|b| b <= isize::MAX as usize))
            .ok_or_else(too_large)?;
        let mut pixels = Vec::with_capacity(count);
        for y in 0..height {
            for x in 0..width {
                pixels.push(self.get_pixel(x / scale, y / scale));
            }
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    // ========================================================================
    // DRAWING
    // ========================================================================

    /// Fill the half-open rectangle `[x0, x1) x [y0, y1)`, clipped to the canvas
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
        let (x0, x1) = (self.clip_x(x0), self.clip_x(x1));
        let (y0, y1) = (self.clip_y(y0), self.clip_y(y1));
        for y in y0..y1 {
            for x in x0..x1 {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Fill every pixel whose centre lies within `radius` of `(cx, cy)`
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba) {
        let r2 = (radius * radius) as f32;
        for y in self.clip_y(cy - radius)..self.clip_y(cy + radius + 1) {
            for x in self.clip_x(cx - radius)..self.clip_x(cx + radius + 1) {
                let dx = x as f32 + 0.5 - cx as f32;
                let dy = y as f32 + 0.5 - cy as f32;
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Horizontal stroke of `thickness` pixels centred on row `y`, from `x0` to `x1` (exclusive)
    pub fn thick_hline(&mut self, x0: i32, x1: i32, y: i32, thickness: i32, color: Rgba) {
        let top = y - thickness / 2;
        self.fill_rect(x0.min(x1), top, x0.max(x1), top + thickness, color);
    }

    /// Vertical stroke of `thickness` pixels centred on column `x`, from `y0` to `y1` (exclusive)
    pub fn thick_vline(&mut self, x: i32, y0: i32, y1: i32, thickness: i32, color: Rgba) {
        let left = x - thickness / 2;
        self.fill_rect(left, y0.min(y1), left + thickness, y0.max(y1), color);
    }

    fn clip_x(&self, x: i32) -> u32 {
        x.clamp(0, self.width as i32) as u32
    }

    fn clip_y(&self, y: i32) -> u32 {
        y.clamp(0, self.height as i32) as u32
    }

    // ========================================================================
    // EXPORT
    // ========================================================================

    /// Encode as an 8-bit RGBA PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, PngError> {
        png::encode(self.width, self.height, &self.pixels)
    }

    /// Encode and write to `path`
    pub fn write_png(&self, path: &Path) -> Result<(), SpriteError> {
        png::write_png(path, self.width, self.height, &self.pixels)?;
        Ok(())
    }
}
