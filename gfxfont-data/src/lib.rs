//! Data model for GFX bitmap fonts: glyph records, the font document and the
//! codec between a glyph's packed row bytes and an editable pixel grid.

mod bitmap;
mod document;
mod error;
mod glyph;
mod view;

pub use bitmap::{PixelGrid, bitmap_from_grid, grid_from_glyph};
pub use document::{CellHeight, FontDocument};
pub use error::Error;
pub use glyph::Glyph;
pub use view::{GlyphView, Pixel};
