use crate::{Error, Glyph, grid_from_glyph};

/// State of one canvas cell when a glyph is drawn at its baseline position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pixel {
    /// Row lies above or below the glyph's bitmap.
    Outside,
    /// Blank pixel within the glyph's rows.
    Off,
    /// Inked pixel.
    On,
}

/// A glyph placed on a fixed-size editing canvas, simulating how the GFX
/// library draws it relative to the cursor.
///
/// The cursor sits on the baseline, the bottom canvas row. The glyph's top row
/// is at `baseline + y_offset + 1` and its leftmost column at `x_offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphView {
    width: u32,
    height: u32,
    cells: Vec<Pixel>,
    advance_marker: Option<(u32, u32)>,
}

impl GlyphView {
    /// Largest canvas side; GFX cell metrics are 8-bit.
    pub const MAX_CELL: u32 = u8::MAX as u32;

    /// Renders `glyph` onto a `cell_width` x `cell_height` canvas.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedWidth`] or [`Error::UnsupportedHeight`] for
    /// glyphs the bitmap codec cannot unpack, and [`Error::CanvasSize`] if
    /// either canvas side exceeds [`Self::MAX_CELL`].
    pub fn render(glyph: &Glyph, cell_width: u32, cell_height: u32) -> Result<Self, Error> {
        if cell_width > Self::MAX_CELL || cell_height > Self::MAX_CELL {
            return Err(Error::CanvasSize {
                width: cell_width,
                height: cell_height,
                max: Self::MAX_CELL,
            });
        }
        let grid = grid_from_glyph(glyph)?;

        let baseline = i64::from(cell_height) - 1;
        let top = baseline + i64::from(glyph.y_offset) + 1;
        let bottom = top + i64::from(glyph.height) - 1;

        let mut view = Self {
            width: cell_width,
            height: cell_height,
            cells: vec![Pixel::Outside; cell_width as usize * cell_height as usize],
            advance_marker: None,
        };

        for row in 0..cell_height {
            let y = i64::from(row);
            if y < top || y > bottom {
                continue;
            }

            let grid_row = (y - top) as u32;
            for column in 0..cell_width {
                view.put(row, column, Pixel::Off);
            }
            for column in 0..glyph.width {
                let x = i64::from(glyph.x_offset) + i64::from(column);
                if grid.get(grid_row, column) {
                    view.put_signed(y, x, Pixel::On);
                }
            }
        }

        let advance = i64::from(glyph.x_offset) + i64::from(glyph.x_advance);
        view.advance_marker = view
            .contains(baseline, advance)
            .then(|| (baseline as u32, advance as u32));

        Ok(view)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The cell at `(row, column)`; out of bounds cells are [`Pixel::Outside`].
    pub fn pixel(&self, row: u32, column: u32) -> Pixel {
        if row < self.height && column < self.width {
            self.cells[self.index(row, column)]
        } else {
            Pixel::Outside
        }
    }

    /// `(row, column)` of the cursor position after drawing, when on canvas.
    pub fn advance_marker(&self) -> Option<(u32, u32)> {
        self.advance_marker
    }

    /// Text rendering: `#` ink, `.` blank, space outside, `|` cursor advance.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for row in 0..self.height {
            for column in 0..self.width {
                let c = match self.pixel(row, column) {
                    Pixel::On => '#',
                    _ if self.advance_marker == Some((row, column)) => '|',
                    Pixel::Off => '.',
                    Pixel::Outside => ' ',
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }

    fn contains(&self, y: i64, x: i64) -> bool {
        y >= 0 && x >= 0 && y < i64::from(self.height) && x < i64::from(self.width)
    }

    fn index(&self, row: u32, column: u32) -> usize {
        row as usize * self.width as usize + column as usize
    }

    fn put(&mut self, row: u32, column: u32, pixel: Pixel) {
        let idx = self.index(row, column);
        self.cells[idx] = pixel;
    }

    fn put_signed(&mut self, y: i64, x: i64, pixel: Pixel) {
        if self.contains(y, x) {
            self.put(y as u32, x as u32, pixel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colon() -> Glyph {
        Glyph {
            key: ":".into(),
            ascii_code: 0x3a,
            bitmap_offset: 0,
            width: 8,
            height: 3,
            x_advance: 2,
            x_offset: 0,
            y_offset: -4,
            font_bitmap: vec![0x80, 0x00, 0x80],
        }
    }

    #[test]
    fn glyph_sits_above_baseline() {
        // cell height 7: baseline row 6, top row 6 - 4 + 1 = 3
        let view = GlyphView::render(&colon(), 8, 7).unwrap();

        assert_eq!(view.pixel(2, 0), Pixel::Outside);
        assert_eq!(view.pixel(3, 0), Pixel::On);
        assert_eq!(view.pixel(4, 0), Pixel::Off);
        assert_eq!(view.pixel(5, 0), Pixel::On);
        assert_eq!(view.pixel(6, 0), Pixel::Outside);
        assert_eq!(view.advance_marker(), Some((6, 2)));
    }

    #[test]
    fn x_offset_shifts_columns() {
        let glyph = Glyph { x_offset: 2, ..colon() };
        let view = GlyphView::render(&glyph, 8, 7).unwrap();

        assert_eq!(view.pixel(3, 0), Pixel::Off);
        assert_eq!(view.pixel(3, 2), Pixel::On);
        assert_eq!(view.advance_marker(), Some((6, 4)));
    }

    #[test]
    fn clipped_rows_and_offscreen_marker() {
        let glyph = Glyph { y_offset: -9, x_advance: 20, ..colon() };
        let view = GlyphView::render(&glyph, 8, 7).unwrap();

        // top row would be -2, only the last bitmap row lands on the canvas
        assert_eq!(view.pixel(0, 0), Pixel::On);
        assert_eq!(view.pixel(1, 0), Pixel::Outside);
        assert_eq!(view.advance_marker(), None);
    }

    #[test]
    fn oversized_input_is_an_error() {
        let tall = Glyph { height: 600_000_000, font_bitmap: vec![], ..colon() };
        assert!(matches!(
            GlyphView::render(&tall, 8, 7),
            Err(Error::UnsupportedHeight { .. })
        ));

        assert!(matches!(
            GlyphView::render(&colon(), 8, 600_000_000),
            Err(Error::CanvasSize { max: 255, .. })
        ));
        assert!(GlyphView::render(&colon(), 255, 255).is_ok());
    }

    #[test]
    fn text_rendering() {
        let view = GlyphView::render(&colon(), 4, 7).unwrap();
        assert_eq!(view.to_text(), "    \n    \n    \n#...\n....\n#...\n  | \n");
    }
}
