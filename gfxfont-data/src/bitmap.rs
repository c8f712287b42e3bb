use crate::{Error, Glyph};

/// An editable pixel grid for one glyph, `height` rows by `width` columns.
///
/// Grids are limited to [`PixelGrid::MAX_WIDTH`] columns since each row is
/// packed into exactly one byte. Wider glyphs are not representable, and
/// neither are glyphs taller than the 8-bit height field of a `GFXglyph`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl PixelGrid {
    /// Maximum number of columns a packed row can hold.
    pub const MAX_WIDTH: u32 = u8::BITS;
    /// Maximum number of rows a glyph record can declare.
    pub const MAX_HEIGHT: u32 = u8::MAX as u32;

    /// Creates an empty grid.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedWidth`] if `width` exceeds [`Self::MAX_WIDTH`]
    /// and [`Error::UnsupportedHeight`] if `height` exceeds [`Self::MAX_HEIGHT`].
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        if width > Self::MAX_WIDTH {
            return Err(Error::unsupported_width(width));
        }
        if height > Self::MAX_HEIGHT {
            return Err(Error::unsupported_height(height));
        }

        Ok(Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns whether the pixel is inked; out of bounds reads are blank.
    pub fn get(&self, row: u32, column: u32) -> bool {
        self.index(row, column)
            .is_some_and(|idx| self.cells[idx])
    }

    /// Sets a pixel; out of bounds writes are ignored.
    pub fn set(&mut self, row: u32, column: u32, on: bool) {
        if let Some(idx) = self.index(row, column) {
            self.cells[idx] = on;
        }
    }

    /// Flips a pixel and returns its new state.
    pub fn toggle(&mut self, row: u32, column: u32) -> bool {
        let on = !self.get(row, column);
        self.set(row, column, on);
        on
    }

    /// Iterates the rows, left to right.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks() rejects a zero chunk size
        self.cells.chunks(self.width.max(1) as usize)
    }

    fn index(&self, row: u32, column: u32) -> Option<usize> {
        (row < self.height && column < self.width)
            .then(|| row as usize * self.width as usize + column as usize)
    }
}

/// Unpacks a glyph's row bytes into a pixel grid.
///
/// Row `r`, column `c` is inked iff bit `width - 1 - c` of `font_bitmap[r]` is
/// set. Missing row bytes read as blank rows.
///
/// # Errors
/// Returns [`Error::UnsupportedWidth`] for glyphs wider than a byte and
/// [`Error::UnsupportedHeight`] for glyphs taller than [`PixelGrid::MAX_HEIGHT`].
pub fn grid_from_glyph(glyph: &Glyph) -> Result<PixelGrid, Error> {
    let mut grid = PixelGrid::new(glyph.width, glyph.height)?;

    for (row, &byte) in glyph
        .font_bitmap
        .iter()
        .take(glyph.height as usize)
        .enumerate()
    {
        for column in 0..glyph.width {
            let bit = glyph.width - 1 - column;
            grid.set(row as u32, column, byte & (1 << bit) != 0);
        }
    }

    Ok(grid)
}

/// Packs a pixel grid into one byte per row, leftmost column most significant.
pub fn bitmap_from_grid(grid: &PixelGrid) -> Vec<u8> {
    if grid.width == 0 {
        return vec![0; grid.height as usize];
    }

    grid.rows()
        .map(|row| {
            row.iter()
                .fold(0u8, |acc, &on| (acc << 1) | u8::from(on))
        })
        .collect()
}
