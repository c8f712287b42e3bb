use std::{fmt::Display, str::FromStr};

use gfxfont_data::{FontDocument, Glyph};
use tracing::{debug, trace, warn};

use crate::Error;

const BITMAP_DECLARATION: &str = "const uint8_t";
const GLYPH_DECLARATION: &str = "const GFXglyph";
const STORAGE_MARKER: &str = "PROGMEM";
const OPENING_BRACE: char = '{';
const CLOSING_MARKER: &str = "};";
const PREPROCESSOR_MARKER: char = '#';
const EXTENDED_DEFINE_SUFFIX: &str = "_USE_EXTENDED";

/// Reads GFX font headers into [`FontDocument`]s.
///
/// The importer only understands the two arrays written by the GFX font
/// tooling, `const uint8_t <Name>Bitmaps[] PROGMEM` and
/// `const GFXglyph <Name>Glyphs[] PROGMEM`, one glyph initializer per line.
/// Missing arrays produce an empty result rather than an error.
///
/// Character codes are not read from the source: glyphs are numbered by
/// position starting at `0x20`, so the header must describe a contiguous
/// character set beginning with the space character.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderImporter {
    strict: bool,
}

impl HeaderImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// In strict mode a disagreement between the summed glyph heights and the
    /// bitmap array length fails the import. Otherwise no glyph receives
    /// bitmap data and the import succeeds.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Imports a header given as lines of text.
    ///
    /// # Errors
    /// Returns [`Error::MalformedHeader`] when a glyph field or bitmap byte is
    /// not a number, and [`Error::BitmapSizeMismatch`] in strict mode.
    pub fn import<I, S>(&self, lines: I) -> Result<FontDocument, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scanner = Scanner::default();
        for (idx, line) in lines.into_iter().enumerate() {
            scanner.scan_line(idx + 1, line.as_ref())?;
        }

        scanner.finish(self.strict)
    }

    /// Imports a header from its full text.
    ///
    /// # Errors
    /// See [`HeaderImporter::import`].
    pub fn import_str(&self, text: &str) -> Result<FontDocument, Error> {
        self.import(text.lines())
    }
}

/// Imports header text with the default, tolerant settings.
///
/// # Errors
/// Returns [`Error::MalformedHeader`] when a numeric token cannot be parsed.
pub fn import_header(text: &str) -> Result<FontDocument, Error> {
    HeaderImporter::new().import_str(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Bitmap,
    Glyphs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Outside both arrays; `pending` is set once a declaration has been seen
    /// whose opening brace is still to come.
    Seeking { pending: Option<Section> },
    InBitmapSection,
    InGlyphSection,
}

impl Default for ScanState {
    fn default() -> Self {
        Self::Seeking { pending: None }
    }
}

/// How a single line participates in the scan.
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    Blank,
    Directive(&'a str),
    /// Code with comments removed; `closes` is set when the array ends on this line.
    Code { text: &'a str, closes: bool },
}

fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim_start();
    if trimmed.starts_with(PREPROCESSOR_MARKER) {
        return LineKind::Directive(trimmed);
    }

    let code = strip_comment(line);
    if code.trim().is_empty() {
        return LineKind::Blank;
    }

    match code.find(CLOSING_MARKER) {
        Some(pos) => LineKind::Code { text: &code[..pos], closes: true },
        None => LineKind::Code { text: code, closes: false },
    }
}

/// Drops a trailing `/* */` or `//` comment.
fn strip_comment(line: &str) -> &str {
    let end = [line.find("/*"), line.find("//")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(line.len());

    &line[..end]
}

fn declared_section(code: &str) -> Option<Section> {
    if !code.contains(STORAGE_MARKER) {
        return None;
    }

    if code.contains(BITMAP_DECLARATION) {
        Some(Section::Bitmap)
    } else if code.contains(GLYPH_DECLARATION) {
        Some(Section::Glyphs)
    } else {
        None
    }
}

#[derive(Debug, Default)]
struct Scanner {
    state: ScanState,
    /// Bitmap array text, concatenated across lines; tokens may span lines.
    hex: String,
    /// `(offset into hex, source line)` for each appended fragment.
    hex_lines: Vec<(usize, usize)>,
    glyphs: Vec<Glyph>,
    extended_characters: bool,
}

impl Scanner {
    fn scan_line(&mut self, line_no: usize, line: &str) -> Result<(), Error> {
        match self.state {
            ScanState::Seeking { pending } => self.seek(line_no, line, pending),
            ScanState::InBitmapSection => self.consume(Section::Bitmap, line_no, line),
            ScanState::InGlyphSection => self.consume(Section::Glyphs, line_no, line),
        }
    }

    fn seek(&mut self, line_no: usize, line: &str, pending: Option<Section>) -> Result<(), Error> {
        let code = match classify(line) {
            LineKind::Directive(directive) => {
                self.read_directive(directive);
                return Ok(());
            },
            LineKind::Blank => return Ok(()),
            LineKind::Code { .. } => strip_comment(line),
        };

        let Some(section) = pending.or_else(|| declared_section(code)) else {
            return Ok(());
        };

        let Some(brace) = code.find(OPENING_BRACE) else {
            self.state = ScanState::Seeking { pending: Some(section) };
            return Ok(());
        };

        trace!(line = line_no, ?section, "entering section");
        self.state = match section {
            Section::Bitmap => ScanState::InBitmapSection,
            Section::Glyphs => ScanState::InGlyphSection,
        };

        // anything after the brace on the declaration line is already content
        self.consume(section, line_no, &code[brace + 1..])
    }

    fn consume(&mut self, section: Section, line_no: usize, line: &str) -> Result<(), Error> {
        let LineKind::Code { text, closes } = classify(line) else {
            return Ok(());
        };

        match section {
            Section::Bitmap => self.push_hex(line_no, text),
            Section::Glyphs if text.trim().is_empty() => {},
            Section::Glyphs => self.push_glyph(line_no, text)?,
        }

        if closes {
            trace!(line = line_no, ?section, "leaving section");
            self.state = ScanState::default();
        }

        Ok(())
    }

    /// Picks up `#define <NAME>_USE_EXTENDED <0|1>` outside the arrays.
    fn read_directive(&mut self, directive: &str) {
        let mut parts = directive.split_whitespace();
        if let (Some("#define"), Some(name), Some(value)) = (parts.next(), parts.next(), parts.next())
            && name.ends_with(EXTENDED_DEFINE_SUFFIX)
        {
            self.extended_characters = value != "0";
        }
    }

    fn push_hex(&mut self, line_no: usize, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        self.hex_lines.push((self.hex.len(), line_no));
        self.hex.push_str(text);
    }

    fn push_glyph(&mut self, line_no: usize, text: &str) -> Result<(), Error> {
        let fields = sextuple(line_no, text)?;
        let ascii_code = Glyph::FIRST_ASCII + self.glyphs.len() as u32;

        // rows are sliced from the bitmap array in finish()
        self.glyphs.push(Glyph {
            bitmap_offset: parse_field(line_no, fields[0])?,
            height: parse_field(line_no, fields[2])?,
            x_advance: parse_field(line_no, fields[3])?,
            x_offset: parse_field(line_no, fields[4])?,
            y_offset: parse_field(line_no, fields[5])?,
            ..Glyph::new(ascii_code, parse_field(line_no, fields[1])?, 0)
        });

        Ok(())
    }

    fn source_line(&self, offset: usize) -> usize {
        let idx = self
            .hex_lines
            .partition_point(|&(start, _)| start <= offset);

        self.hex_lines
            .get(idx.saturating_sub(1))
            .map_or(0, |&(_, line)| line)
    }

    fn bitmap_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        let mut offset = 0;

        for token in self.hex.split(',') {
            let start = offset;
            offset += token.len() + 1;

            let trimmed = token.trim();
            if trimmed.is_empty() {
                continue;
            }

            let digits = trimmed
                .strip_prefix("0x")
                .or_else(|| trimmed.strip_prefix("0X"))
                .unwrap_or(trimmed);

            let malformed = |reason: String| {
                Error::malformed_header(self.source_line(start), trimmed, reason)
            };
            // from_str_radix tolerates a sign
            if !digits.starts_with(|c: char| c.is_ascii_hexdigit()) {
                return Err(malformed("invalid bitmap byte: expected hex digits".to_string()));
            }
            let byte = u8::from_str_radix(digits, 16)
                .map_err(|e| malformed(format!("invalid bitmap byte: {e}")))?;
            bytes.push(byte);
        }

        Ok(bytes)
    }

    fn finish(self, strict: bool) -> Result<FontDocument, Error> {
        let bitmap = self.bitmap_bytes()?;
        let mut glyphs = self.glyphs;

        let expected: usize = glyphs.iter().map(|g| g.height as usize).sum();
        if expected == bitmap.len() {
            for glyph in &mut glyphs {
                let start = (glyph.bitmap_offset as usize).min(bitmap.len());
                let end = (start + glyph.height as usize).min(bitmap.len());
                glyph.font_bitmap = bitmap[start..end].to_vec();
            }
        } else if strict {
            return Err(Error::BitmapSizeMismatch { expected, actual: bitmap.len() });
        } else {
            warn!(
                expected,
                actual = bitmap.len(),
                "Bitmap array length does not match glyph heights; glyph bitmaps left empty"
            );
        }

        debug!(
            glyph_count = glyphs.len(),
            bitmap_bytes = bitmap.len(),
            "Imported font header"
        );

        let mut document = FontDocument {
            extended_characters: self.extended_characters,
            items: glyphs,
            ..FontDocument::new()
        };
        document.font_width = document.max_glyph_width();
        document.font_height = document.max_glyph_height();

        Ok(document)
    }
}

/// The six comma separated fields between the first `{` and the next `}`.
fn sextuple(line_no: usize, text: &str) -> Result<[&str; 6], Error> {
    let malformed = |reason: &str| Error::malformed_header(line_no, text, reason);

    let start = text
        .find(OPENING_BRACE)
        .ok_or_else(|| malformed("expected `{` opening a glyph entry"))?;
    let end = text[start..]
        .find('}')
        .map(|pos| start + pos)
        .ok_or_else(|| malformed("expected `}` closing a glyph entry"))?;

    let fields: Vec<&str> = text[start + 1..end]
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();

    <[&str; 6]>::try_from(fields)
        .map_err(|f| malformed(&format!("expected 6 glyph fields, found {}", f.len())))
}

fn parse_field<T>(line_no: usize, token: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: Display,
{
    token
        .parse()
        .map_err(|e| Error::malformed_header(line_no, token, format!("invalid glyph field: {e}")))
}
