use std::fmt::Debug;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{Error, Glyph, PixelGrid};

/// A complete bitmap font as edited: the glyph set plus font-wide metadata.
///
/// Glyphs are kept in insertion order; everything that emits source code
/// visits them in ascending `ascii_code` order via [`FontDocument::sorted_items`].
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontDocument {
    /// Nominal cell height, also emitted as the font's vertical spacing
    pub font_height: u32,
    /// Nominal cell width
    pub font_width: u32,
    /// Whether glyphs past 0x7E are compiled into the generated header
    pub extended_characters: bool,
    /// Free text placed in the generated header comment
    #[serde(default)]
    pub description: String,
    pub major_version: u32,
    pub minor_version: u32,
    pub date_time_created: NaiveDateTime,
    pub last_modified_date_time: NaiveDateTime,
    /// The glyphs in the font
    pub items: Vec<Glyph>,
}

impl Debug for FontDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontDocument")
            .field("font_size", &(self.font_width, self.font_height))
            .field("extended_characters", &self.extended_characters)
            .field("version", &self.version())
            .field("glyph_count", &self.items.len())
            .finish()
    }
}

/// How the editing canvas chooses its cell height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellHeight {
    /// The document's fixed `font_height`.
    #[default]
    Document,
    /// The tallest glyph in the document.
    TallestGlyph,
}

impl FontDocument {
    /// Cell size of the blank font template.
    pub const TEMPLATE_CELL: (u32, u32) = (8, 7);

    /// Creates an empty document stamped with the current local time.
    pub fn new() -> Self {
        let now = Local::now().naive_local();
        Self {
            font_height: 0,
            font_width: 0,
            extended_characters: false,
            description: String::new(),
            major_version: 1,
            minor_version: 0,
            date_time_created: now,
            last_modified_date_time: now,
            items: Vec::new(),
        }
    }

    /// Creates the blank template used for a new font: one empty glyph per
    /// printable ASCII character.
    pub fn new_template() -> Self {
        let (width, height) = Self::TEMPLATE_CELL;
        let items = (Glyph::FIRST_ASCII..=Glyph::LAST_ASCII)
            .map(|code| Glyph {
                x_advance: 5,
                y_offset: -5,
                ..Glyph::new(code, width, height)
            })
            .collect();

        let mut document = Self {
            font_width: width,
            font_height: height,
            items,
            ..Self::new()
        };
        document.reindex();
        document
    }

    /// The version string as emitted in the header, e.g. `1.05`.
    pub fn version(&self) -> String {
        format!("{}.{:02}", self.major_version, self.minor_version)
    }

    /// Bumps the minor version, carrying into the major version past 99.
    pub fn increment_version(&mut self) {
        self.minor_version += 1;

        if self.minor_version > 99 {
            self.major_version += 1;
            self.minor_version = 0;
        }
    }

    /// Marks the document as modified now.
    pub fn touch(&mut self) {
        self.last_modified_date_time = Local::now().naive_local();
    }

    /// Glyphs in ascending `ascii_code` order.
    pub fn sorted_items(&self) -> Vec<&Glyph> {
        let mut items: Vec<&Glyph> = self.items.iter().collect();
        items.sort_by_key(|g| g.ascii_code);
        items
    }

    pub fn glyph(&self, ascii_code: u32) -> Option<&Glyph> {
        self.items.iter().find(|g| g.ascii_code == ascii_code)
    }

    /// Mutable access to a glyph. Height changes must go through
    /// [`FontDocument::set_glyph_height`] to keep rows and offsets consistent.
    pub fn glyph_mut(&mut self, ascii_code: u32) -> Option<&mut Glyph> {
        self.items
            .iter_mut()
            .find(|g| g.ascii_code == ascii_code)
    }

    /// Sets a glyph's height, clamped to `1..=font_height`, and returns the
    /// height applied. Rows are added or dropped at the bottom of the bitmap
    /// and all offsets are recomputed.
    ///
    /// # Errors
    /// Returns [`Error::MissingGlyph`] if no glyph has `ascii_code`.
    pub fn set_glyph_height(&mut self, ascii_code: u32, height: u32) -> Result<u32, Error> {
        let max = self.font_height.clamp(1, PixelGrid::MAX_HEIGHT);
        let glyph = self
            .glyph_mut(ascii_code)
            .ok_or(Error::MissingGlyph { ascii_code })?;

        let height = height.clamp(1, max);
        glyph.height = height;
        glyph.font_bitmap.resize(height as usize, 0);
        self.reindex();

        Ok(height)
    }

    /// Sets a glyph's horizontal offset, clamped to `0..=font_width`, and
    /// returns the offset applied.
    ///
    /// # Errors
    /// Returns [`Error::MissingGlyph`] if no glyph has `ascii_code`.
    pub fn set_glyph_x_offset(&mut self, ascii_code: u32, x_offset: i32) -> Result<i32, Error> {
        let max = i32::try_from(self.font_width).unwrap_or(i32::MAX);
        let glyph = self
            .glyph_mut(ascii_code)
            .ok_or(Error::MissingGlyph { ascii_code })?;

        glyph.x_offset = x_offset.clamp(0, max);
        Ok(glyph.x_offset)
    }

    /// Recomputes every `bitmap_offset` so the glyphs' rows lie back to back
    /// in ascending code order. Must run whenever glyph order or heights change.
    pub fn reindex(&mut self) {
        self.items.sort_by_key(|g| g.ascii_code);

        let mut offset = 0;
        for glyph in &mut self.items {
            glyph.bitmap_offset = offset;
            offset = offset.saturating_add(glyph.height);
        }
    }

    /// The widest glyph, or zero without glyphs.
    pub fn max_glyph_width(&self) -> u32 {
        self.items.iter().map(|g| g.width).max().unwrap_or(0)
    }

    /// The tallest glyph, or zero without glyphs.
    pub fn max_glyph_height(&self) -> u32 {
        self.items.iter().map(|g| g.height).max().unwrap_or(0)
    }

    /// The canvas cell height for the given editing mode.
    pub fn cell_height(&self, mode: CellHeight) -> u32 {
        match mode {
            CellHeight::Document => self.font_height,
            CellHeight::TallestGlyph => self.max_glyph_height(),
        }
    }

    /// Smallest and largest character code, `None` without glyphs.
    pub fn code_range(&self) -> Option<(u32, u32)> {
        let first = self.items.iter().map(|g| g.ascii_code).min()?;
        let last = self.items.iter().map(|g| g.ascii_code).max()?;
        Some((first, last))
    }

    /// Deserializes a saved editor document.
    ///
    /// # Errors
    /// Returns [`Error::Json`] if the text is not a valid document.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the document as indented JSON.
    ///
    /// # Errors
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for FontDocument {
    fn default() -> Self {
        Self::new()
    }
}
