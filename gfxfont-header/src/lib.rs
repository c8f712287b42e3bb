//! Conversion between GFX font C headers and [`FontDocument`]s.
//!
//! The importer is a line scanner for the two `PROGMEM` arrays emitted by the
//! GFX font tooling; it does not parse C. The exporter regenerates the header
//! in the exact layout the tooling produces.

mod error;
mod export;
mod import;
mod template;

pub use error::Error;
pub use export::{HeaderExporter, export_header};
pub use gfxfont_data::FontDocument;
pub use import::{HeaderImporter, import_header};
