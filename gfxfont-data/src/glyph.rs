use std::fmt;

use compact_str::{CompactString, ToCompactString};
use serde::{Deserialize, Serialize};

use crate::{Error, PixelGrid, bitmap_from_grid};

/// A single character of a GFX bitmap font.
///
/// Mirrors one entry of the `GFXglyph` array plus the glyph's slice of the
/// font-wide bitmap array. Rows are packed one byte per row, most significant
/// bit first, so `font_bitmap.len() == height` once populated and only glyphs
/// up to [`PixelGrid::MAX_WIDTH`] columns wide can be represented.
///
/// # Field Layout
///
/// | Field           | C struct member | Description                                  |
/// |-----------------|-----------------|----------------------------------------------|
/// | `bitmap_offset` | `bitmapOffset`  | Index of the first row byte in the bitmap    |
/// | `width`         | `width`         | Bitmap width in pixels                       |
/// | `height`        | `height`        | Bitmap height in pixels (= row byte count)   |
/// | `x_advance`     | `xAdvance`      | Distance to advance the cursor (x axis)      |
/// | `x_offset`      | `xOffset`       | X distance from cursor to upper-left corner  |
/// | `y_offset`      | `yOffset`       | Y distance from cursor to upper-left corner  |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Glyph {
    /// Display label, usually the character itself
    pub key: CompactString,
    /// Character code; unique within a document and drives export order
    pub ascii_code: u32,
    /// Offset of the first row byte in the font's flat bitmap array
    pub bitmap_offset: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Cursor advance after drawing
    pub x_advance: i32,
    /// Horizontal distance from the cursor to the upper-left corner
    pub x_offset: i32,
    /// Vertical distance from the cursor (baseline) to the upper-left corner
    pub y_offset: i32,
    /// One packed byte per pixel row
    #[serde(default)]
    pub font_bitmap: Vec<u8>,
}

impl Glyph {
    /// First code of the base character set.
    pub const FIRST_ASCII: u32 = 0x20;
    /// Last code of the base character set; codes above it are extended.
    pub const LAST_ASCII: u32 = 0x7E;

    /// Creates a blank glyph for `ascii_code`, keyed by its character.
    pub fn new(ascii_code: u32, width: u32, height: u32) -> Self {
        Self {
            key: key_for_code(ascii_code),
            ascii_code,
            bitmap_offset: 0,
            width,
            height,
            x_advance: 0,
            x_offset: 0,
            y_offset: 0,
            font_bitmap: vec![0; height as usize],
        }
    }

    /// Returns true if this glyph lies past the base character set.
    pub fn is_extended(&self) -> bool {
        self.ascii_code > Self::LAST_ASCII
    }

    /// The `GFXglyph` initializer for this glyph, e.g. `{ 0, 8, 5, 5, 0, -4 }`.
    pub fn struct_literal(&self) -> String {
        format!(
            "{{ {}, {}, {}, {}, {}, {} }}",
            self.bitmap_offset, self.width, self.height, self.x_advance, self.x_offset, self.y_offset
        )
    }

    /// The trailing source comment identifying this glyph, e.g. `/* 0x41 A */`.
    pub fn code_comment(&self) -> String {
        format!("/* 0x{:02x} {} */", self.ascii_code, self.key)
    }

    /// Upper-case hex rendering of the character code, e.g. `0x7E`.
    pub fn hex(&self) -> String {
        format!("0x{:02X}", self.ascii_code)
    }

    /// Replaces the row bytes with those packed from `grid`.
    ///
    /// # Errors
    /// Returns [`Error::GridSize`] if the grid dimensions differ from the glyph's.
    pub fn apply_grid(&mut self, grid: &PixelGrid) -> Result<(), Error> {
        let expected = (self.width, self.height);
        let actual = (grid.width(), grid.height());
        if expected != actual {
            return Err(Error::grid_size(expected, actual));
        }

        self.font_bitmap = bitmap_from_grid(grid);
        Ok(())
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}, {}, {}, {}, {}, {}]",
            self.key,
            self.bitmap_offset,
            self.width,
            self.height,
            self.x_advance,
            self.x_offset,
            self.y_offset
        )
    }
}

/// The label used for a glyph created from its code alone.
pub(crate) fn key_for_code(ascii_code: u32) -> CompactString {
    char::from_u32(ascii_code)
        .map(|c| c.to_compact_string())
        .unwrap_or_default()
}
