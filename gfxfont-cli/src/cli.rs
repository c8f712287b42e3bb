use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::{Report, eyre::eyre};

#[derive(Parser, Debug)]
#[command(
    name = "gfxfont",
    version,
    about = "Bitmap font editor tooling for GFX font headers",
    long_about = "Imports GFX font headers (PROGMEM bitmap and glyph arrays) into editable JSON \
                  documents, previews glyphs at their baseline position and regenerates headers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import a GFX font header into a JSON font document
    Import {
        /// Header file to read
        #[arg(value_name = "HEADER", value_parser = validate_file_exists)]
        header: PathBuf,

        /// Output document path (defaults to the header path with a .json extension)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Fail if the bitmap array length disagrees with the glyph heights
        #[arg(long)]
        strict: bool,
    },

    /// Generate a GFX font header from a JSON font document
    Export {
        /// Font document to read
        #[arg(value_name = "DOCUMENT", value_parser = validate_file_exists)]
        document: PathBuf,

        /// C identifier prefix for the generated arrays (defaults to the file name)
        #[arg(short, long, value_name = "NAME")]
        name: Option<String>,

        /// Output header path (defaults to the document path with a .h extension)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Open the header with a copyright notice naming this holder
        #[arg(long, value_name = "HOLDER")]
        copyright: Option<String>,
    },

    /// Create a blank font document covering printable ASCII
    New {
        /// Output document path
        #[arg(short, long, default_value = "./new_font.json", value_name = "PATH")]
        output: PathBuf,
    },

    /// Print glyphs as drawn relative to the baseline
    Preview {
        /// Header (.h) or font document (.json)
        #[arg(value_name = "FILE", value_parser = validate_file_exists)]
        file: PathBuf,

        /// Glyphs to show, as a character or hex code (e.g. A or 0x41); all if omitted
        #[arg(short, long = "char", value_name = "CHAR", value_parser = parse_char_code)]
        codes: Vec<u32>,

        /// Size the canvas by the tallest glyph instead of the font height
        #[arg(long)]
        tallest: bool,
    },

    /// Edit the placement metrics of one glyph in a font document
    Glyph {
        /// Font document to update in place
        #[arg(value_name = "DOCUMENT", value_parser = validate_file_exists)]
        document: PathBuf,

        /// Glyph to edit, as a character or hex code
        #[arg(short, long = "char", value_name = "CHAR", value_parser = parse_char_code)]
        code: u32,

        /// Number of rows, clamped to 1..=font height
        #[arg(long, value_name = "ROWS")]
        height: Option<u32>,

        /// Cursor advance after drawing
        #[arg(long, value_name = "PIXELS", allow_negative_numbers = true)]
        x_advance: Option<i32>,

        /// Horizontal offset from the cursor, clamped to 0..=font width
        #[arg(long, value_name = "PIXELS", allow_negative_numbers = true)]
        x_offset: Option<i32>,

        /// Vertical offset from the baseline to the top row
        #[arg(long, value_name = "PIXELS", allow_negative_numbers = true)]
        y_offset: Option<i32>,
    },

    /// Recompute bitmap offsets and bump the minor version of a font document
    Reindex {
        /// Font document to update in place
        #[arg(value_name = "DOCUMENT", value_parser = validate_file_exists)]
        document: PathBuf,
    },
}

impl Cli {
    /// Validates arguments clap cannot check on its own
    pub fn validate(&self) -> Result<(), Report> {
        if let Command::Export { name: Some(name), .. } = &self.command
            && !is_c_identifier(name)
        {
            return Err(eyre!("Font name '{name}' is not a valid C identifier"));
        }

        Ok(())
    }
}

/// Turns a file name into a usable C identifier prefix.
pub fn c_identifier(stem: &str) -> String {
    let mut ident: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    ident
}

fn is_c_identifier(s: &str) -> bool {
    !s.is_empty() && c_identifier(s) == s
}

/// The font name implied by a file path.
pub fn name_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();

    c_identifier(&stem)
}

/// `output` if given, otherwise `input` with its extension replaced.
pub fn output_path(input: &Path, output: Option<&Path>, extension: &str) -> PathBuf {
    output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension(extension))
}

fn parse_char_code(s: &str) -> Result<u32, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(c as u32);
    }

    s.strip_prefix("0x")
        .ok_or_else(|| format!("Expected a single character or hexadecimal code (0x..), got: {s}"))
        .map(|hex_str| u32::from_str_radix(hex_str, 16))?
        .map_err(|_| format!("Invalid hexadecimal number: {s}"))
}

fn validate_file_exists(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    match () {
        _ if !path.exists() => Err(format!("Input file does not exist: {s}")),
        _ if !path.is_file() => Err(format!("Path is not a file: {s}")),
        _ => Ok(path),
    }
}
