use std::{fs, path::Path};

use color_eyre::eyre::{Context, Result, eyre};
use gfxfont_data::FontDocument;
use gfxfont_header::HeaderImporter;

/// On-disk representations of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    /// GFX font C header
    Header,
    /// Saved editor document
    Json,
}

impl FontFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("h" | "hpp" | "c") => Ok(Self::Header),
            Some("json") => Ok(Self::Json),
            _ => Err(eyre!(
                "Unrecognized font file '{}': expected a .h header or .json document",
                path.display()
            )),
        }
    }
}

/// Loads a font from either a header or a saved document.
pub fn load_font(path: &Path, strict: bool) -> Result<FontDocument> {
    match FontFormat::from_path(path)? {
        FontFormat::Header => import_header_file(path, strict),
        FontFormat::Json => load_document(path),
    }
}

pub fn import_header_file(path: &Path, strict: bool) -> Result<FontDocument> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read header '{}'", path.display()))?;

    HeaderImporter::new()
        .strict(strict)
        .import_str(&text)
        .wrap_err_with(|| format!("Failed to import '{}'", path.display()))
}

pub fn load_document(path: &Path) -> Result<FontDocument> {
    let json = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read document '{}'", path.display()))?;

    FontDocument::from_json(&json)
        .wrap_err_with(|| format!("Failed to parse document '{}'", path.display()))
}

pub fn save_document(document: &FontDocument, path: &Path) -> Result<()> {
    let json = document.to_json()?;
    write_text(path, &json)
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).wrap_err_with(|| format!("Failed to write '{}'", path.display()))
}
