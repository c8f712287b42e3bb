//! `gfxfont`: import, export and preview GFX bitmap font headers.

mod cli;
mod font_file;
mod logging;
mod preview;

use std::path::Path;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use gfxfont_data::{CellHeight, FontDocument};
use gfxfont_header::HeaderExporter;

use crate::{
    cli::{Cli, Command, name_from_path, output_path},
    logging::{LoggingConfig, init_logging},
};

fn main() -> Result<()> {
    // panic hook
    color_eyre::install()?;

    let logging_config = LoggingConfig::from_env();
    let _guard = init_logging(&logging_config).wrap_err("Failed to initialize logging")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gfxfont starting up");

    let cli = Cli::parse();
    cli.validate()?;

    match cli.command {
        Command::Import { header, output, strict } => import(&header, output.as_deref(), strict),
        Command::Export { document, name, output, copyright } => {
            export(&document, name.as_deref(), output.as_deref(), copyright.as_deref())
        },
        Command::New { output } => new_font(&output),
        Command::Preview { file, codes, tallest } => preview(&file, &codes, tallest),
        Command::Glyph { document, code, height, x_advance, x_offset, y_offset } => {
            let edit = GlyphEdit { height, x_advance, x_offset, y_offset };
            edit_glyph(&document, code, &edit)
        },
        Command::Reindex { document } => reindex(&document),
    }
}

fn import(header: &Path, output: Option<&Path>, strict: bool) -> Result<()> {
    let document = font_file::import_header_file(header, strict)?;
    let output = output_path(header, output, "json");
    font_file::save_document(&document, &output)?;

    let missing = document
        .items
        .iter()
        .filter(|g| g.font_bitmap.is_empty() && g.height > 0)
        .count();

    println!("Imported {} glyphs from {}", document.items.len(), header.display());
    println!("Font size: {}x{}", document.font_width, document.font_height);
    if missing > 0 {
        println!("⚠️  {missing} glyphs have no bitmap data (bitmap array size did not match)");
    }
    println!("Document written to {}", output.display());

    Ok(())
}

fn export(
    document_path: &Path,
    name: Option<&str>,
    output: Option<&Path>,
    copyright: Option<&str>,
) -> Result<()> {
    let document = font_file::load_document(document_path)?;
    let name = name.map_or_else(|| name_from_path(document_path), str::to_string);

    let mut exporter = HeaderExporter::new(&document);
    if let Some(holder) = copyright {
        exporter = exporter.copyright(holder);
    }
    let header = exporter
        .export(&name)
        .wrap_err_with(|| format!("Failed to export '{}'", document_path.display()))?;

    let output = output_path(document_path, output, "h");
    font_file::write_text(&output, &header)?;

    println!("Exported {} glyphs as '{name}' to {}", document.items.len(), output.display());
    Ok(())
}

fn new_font(output: &Path) -> Result<()> {
    let document = FontDocument::new_template();
    font_file::save_document(&document, output)?;

    println!(
        "Created blank {}x{} font with {} glyphs at {}",
        document.font_width,
        document.font_height,
        document.items.len(),
        output.display()
    );
    Ok(())
}

fn preview(file: &Path, codes: &[u32], tallest: bool) -> Result<()> {
    let document = font_file::load_font(file, false)?;
    let mode = if tallest { CellHeight::TallestGlyph } else { CellHeight::Document };

    print!("{}", preview::render_preview(&document, codes, mode));
    Ok(())
}

/// Requested metric changes for one glyph.
#[derive(Debug, Default)]
struct GlyphEdit {
    height: Option<u32>,
    x_advance: Option<i32>,
    x_offset: Option<i32>,
    y_offset: Option<i32>,
}

fn edit_glyph(document_path: &Path, code: u32, edit: &GlyphEdit) -> Result<()> {
    let mut document = font_file::load_document(document_path)?;
    apply_glyph_edit(&mut document, code, edit)?;
    document.touch();
    font_file::save_document(&document, document_path)?;

    if let Some(glyph) = document.glyph(code) {
        println!("{} {glyph}", glyph.hex());
    }
    Ok(())
}

fn apply_glyph_edit(document: &mut FontDocument, code: u32, edit: &GlyphEdit) -> Result<()> {
    if let Some(height) = edit.height {
        document.set_glyph_height(code, height)?;
    }
    if let Some(x_offset) = edit.x_offset {
        document.set_glyph_x_offset(code, x_offset)?;
    }

    let glyph = document
        .glyph_mut(code)
        .ok_or(gfxfont_data::Error::MissingGlyph { ascii_code: code })?;
    if let Some(x_advance) = edit.x_advance {
        glyph.x_advance = x_advance;
    }
    if let Some(y_offset) = edit.y_offset {
        glyph.y_offset = y_offset;
    }

    Ok(())
}

fn reindex(document_path: &Path) -> Result<()> {
    let mut document = font_file::load_document(document_path)?;
    document.reindex();
    document.increment_version();
    document.touch();
    font_file::save_document(&document, document_path)?;

    println!("Reindexed {} glyphs, version {}", document.items.len(), document.version());
    Ok(())
}
