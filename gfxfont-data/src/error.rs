/// Errors raised by the glyph model and bitmap codec.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A glyph row does not fit into a single byte.
    #[error("Unsupported glyph width {width}: rows are packed into one byte (max {max} columns)")]
    UnsupportedWidth { width: u32, max: u32 },

    /// A glyph has more rows than the header format can describe.
    #[error("Unsupported glyph height {height} (max {max} rows)")]
    UnsupportedHeight { height: u32, max: u32 },

    /// An editing canvas larger than any GFX glyph cell.
    #[error("Canvas of {width}x{height} exceeds the {max}x{max} cell limit")]
    CanvasSize { width: u32, height: u32, max: u32 },

    /// No glyph is defined for the character code.
    #[error("No glyph for character code 0x{ascii_code:02x}")]
    MissingGlyph { ascii_code: u32 },

    /// A pixel grid does not match the glyph it is applied to.
    #[error("Grid size mismatch: glyph is {expected:?}, grid is {actual:?}")]
    GridSize {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// JSON document (de)serialization failed.
    #[error("Font document JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn unsupported_width(width: u32) -> Self {
        Self::UnsupportedWidth { width, max: crate::PixelGrid::MAX_WIDTH }
    }

    pub(crate) fn unsupported_height(height: u32) -> Self {
        Self::UnsupportedHeight { height, max: crate::PixelGrid::MAX_HEIGHT }
    }

    pub(crate) fn grid_size(expected: (u32, u32), actual: (u32, u32)) -> Self {
        Self::GridSize { expected, actual }
    }
}
