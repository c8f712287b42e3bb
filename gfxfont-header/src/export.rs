use gfxfont_data::{FontDocument, Glyph};
use tracing::debug;

use crate::{
    Error,
    template::{render_copyright, render_header},
};

/// Spaces between the longest array entry and its trailing comment.
const COMMENT_GAP: usize = 4;

/// Generates GFX font headers from a [`FontDocument`].
///
/// Output follows the layout of the GFX font tooling: a metadata comment, the
/// `<NAME>_USE_EXTENDED` switch, the bitmap array, the glyph array and the
/// `GFXfont` struct. Array entries are emitted in ascending character code
/// order, padded to a common column and followed by a `/* 0x.. c */` comment.
/// Glyphs after `0x7E` are wrapped in `#if (<NAME>_USE_EXTENDED)` / `#endif`.
#[derive(Debug, Clone, Copy)]
pub struct HeaderExporter<'a> {
    document: &'a FontDocument,
    copyright: Option<&'a str>,
}

impl<'a> HeaderExporter<'a> {
    pub fn new(document: &'a FontDocument) -> Self {
        Self { document, copyright: None }
    }

    /// Opens the header with a copyright notice naming `holder`.
    #[must_use]
    pub fn copyright(mut self, holder: &'a str) -> Self {
        self.copyright = Some(holder);
        self
    }

    /// Renders the header, using `name` as the C identifier prefix.
    ///
    /// # Errors
    /// Returns [`Error::EmptyDocument`] if the document has no glyphs and
    /// [`Error::DuplicateCode`] if two glyphs share a character code.
    pub fn export(&self, name: &str) -> Result<String, Error> {
        let document = self.document;
        let (first, last) = document.code_range().ok_or(Error::EmptyDocument)?;
        let glyphs = document.sorted_items();
        if let Some(pair) = glyphs
            .windows(2)
            .find(|pair| pair[0].ascii_code == pair[1].ascii_code)
        {
            return Err(Error::DuplicateCode { ascii_code: pair[0].ascii_code });
        }

        let guard = format!("{}_USE_EXTENDED", name.to_uppercase());

        let bitmaps: Vec<_> = glyphs
            .iter()
            .map(|&g| (g, bitmap_entry(g)))
            .collect();
        let records: Vec<_> = glyphs
            .iter()
            .map(|&g| (g, g.struct_literal()))
            .collect();

        let mut out = SourceWriter::default();
        if let Some(holder) = self.copyright {
            out.line(render_copyright(document, holder));
            out.blank();
        }
        out.line(render_header(document, name));
        out.blank();
        out.line(format!(
            "#define {guard} {}",
            u8::from(document.extended_characters)
        ));
        out.blank();

        out.line(format!("const uint8_t {name}Bitmaps[] PROGMEM ="));
        out.array(&bitmaps, &guard);
        out.blank();

        out.line("/* {offset, width, height, advance cursor, x offset, y offset} */");
        out.line(format!("const GFXglyph {name}Glyphs[] PROGMEM ="));
        out.array(&records, &guard);
        out.blank();

        out.line(format!("const GFXfont {name} PROGMEM ="));
        out.line("{");
        out.line(format!("\t(uint8_t*){name}Bitmaps,"));
        out.line(format!("\t(GFXglyph*){name}Glyphs,"));
        out.line(format!("\t0x{first:02x}, /* First ASCII Character */"));
        out.line(format!("\t0x{last:02x}, /* Last ASCII Character */"));
        out.line(format!("\t0x{:02x}  /* Vertical Spacing */", document.font_height));
        out.line("};");

        debug!(
            font = name,
            glyph_count = glyphs.len(),
            bitmap_bytes = glyphs.iter().map(|g| g.font_bitmap.len()).sum::<usize>(),
            "Exported font header"
        );

        Ok(out.finish())
    }
}

/// Renders `document` as header text named `name`.
///
/// # Errors
/// Returns [`Error::EmptyDocument`] if the document has no glyphs and
/// [`Error::DuplicateCode`] if two glyphs share a character code.
pub fn export_header(document: &FontDocument, name: &str) -> Result<String, Error> {
    HeaderExporter::new(document).export(name)
}

fn bitmap_entry(glyph: &Glyph) -> String {
    glyph
        .font_bitmap
        .iter()
        .map(|b| format!("0x{b:02x}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Default)]
struct SourceWriter {
    out: String,
}

impl SourceWriter {
    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Writes a brace-delimited array body, one padded entry per glyph.
    fn array(&mut self, entries: &[(&Glyph, String)], guard: &str) {
        let width = entries
            .iter()
            .map(|(_, value)| value.len())
            .max()
            .unwrap_or(0)
            + COMMENT_GAP;
        let last = entries.len().saturating_sub(1);
        let mut guard_open = false;

        self.line("{");
        for (idx, (glyph, value)) in entries.iter().enumerate() {
            let separator = if idx == last { "  " } else { ", " };
            let entry = format!("\t{value}{separator}");
            self.line(format!("{entry:<width$}{}", glyph.code_comment()));

            if glyph.ascii_code == Glyph::LAST_ASCII {
                self.line(format!("#if ({guard})"));
                guard_open = true;
            }
        }

        if guard_open {
            self.line("#endif");
        }
        self.line("};");
    }

    fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(ascii_code: u32, font_bitmap: Vec<u8>) -> Glyph {
        Glyph {
            x_advance: 4,
            y_offset: -(font_bitmap.len() as i32),
            font_bitmap,
            ..Glyph::new(ascii_code, 8, 0)
        }
    }

    fn document(items: Vec<Glyph>) -> FontDocument {
        let mut doc = FontDocument {
            font_width: 8,
            font_height: 5,
            items: items
                .into_iter()
                .map(|g| Glyph { height: g.font_bitmap.len() as u32, ..g })
                .collect(),
            ..FontDocument::new()
        };
        doc.reindex();
        doc
    }

    fn array_block<'t>(text: &'t str, declaration: &str) -> Vec<&'t str> {
        text.lines()
            .skip_while(|l| !l.starts_with(declaration))
            .skip(2)
            .take_while(|l| *l != "};")
            .collect()
    }

    #[test]
    fn empty_document_is_rejected() {
        let result = export_header(&FontDocument::new(), "Empty");
        assert!(matches!(result, Err(Error::EmptyDocument)));
    }

    #[test]
    fn entries_are_padded_to_common_column() {
        let doc = document(vec![
            glyph(0x21, vec![0x80, 0x80, 0x00, 0x80]),
            glyph(0x20, vec![0x00]),
        ]);
        let text = export_header(&doc, "Pad").unwrap();

        let longest = "0x80, 0x80, 0x00, 0x80".len();
        let bitmaps = array_block(&text, "const uint8_t PadBitmaps");
        assert_eq!(bitmaps.len(), 2);
        assert_eq!(
            bitmaps[0],
            format!("{:<width$}/* 0x20   */", "\t0x00, ", width = longest + 4)
        );
        assert_eq!(
            bitmaps[1],
            format!("{:<width$}/* 0x21 ! */", "\t0x80, 0x80, 0x00, 0x80  ", width = longest + 4)
        );

        for line in bitmaps {
            let code = &line[..line.find("/*").unwrap()];
            assert_eq!(code.len(), longest + 4, "{line:?}");
        }
    }

    #[test]
    fn glyph_records_in_code_order() {
        let doc = document(vec![glyph(0x22, vec![0xff]), glyph(0x20, vec![0x00, 0x00])]);
        let text = export_header(&doc, "Ord").unwrap();

        let glyphs = array_block(&text, "const GFXglyph OrdGlyphs");
        assert_eq!(glyphs.len(), 2);
        assert!(glyphs[0].starts_with("\t{ 0, 8, 2, 4, 0, -2 }, "));
        assert!(glyphs[0].ends_with("/* 0x20   */"));
        assert!(glyphs[1].starts_with("\t{ 2, 8, 1, 4, 0, -1 }  "));
        assert!(glyphs[1].ends_with("/* 0x22 \" */"));

        let longest = "{ 0, 8, 2, 4, 0, -2 }".len();
        for line in glyphs {
            let code = &line[..line.find("/*").unwrap()];
            assert_eq!(code.len(), longest + 4, "{line:?}");
        }
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let doc = document(vec![glyph(0x20, vec![0x00]), glyph(0x20, vec![0x00])]);
        let result = export_header(&doc, "Dup");
        assert!(matches!(result, Err(Error::DuplicateCode { ascii_code: 0x20 })));
    }

    #[test]
    fn copyright_precedes_metadata() {
        let doc = document(vec![glyph(0x20, vec![0x00])]);
        let text = HeaderExporter::new(&doc)
            .copyright("Jane Doe")
            .export("Owned")
            .unwrap();

        assert!(text.starts_with("/*\n * Copyright (C) "));
        assert!(text.contains("Jane Doe. All rights reserved.\n */\n\n/*\n * Owned\n"));

        let plain = export_header(&doc, "Owned").unwrap();
        assert!(!plain.contains("Copyright"));
    }

    #[test]
    fn guard_follows_tilde_and_closes_array() {
        let doc = document(vec![glyph(0x7d, vec![0x40]), glyph(0x7e, vec![0x50])]);
        let text = export_header(&doc, "Tilde").unwrap();

        for declaration in ["const uint8_t TildeBitmaps", "const GFXglyph TildeGlyphs"] {
            let block = array_block(&text, declaration);
            assert_eq!(block.len(), 4);
            assert!(block[1].ends_with("/* 0x7e ~ */"));
            assert_eq!(block[2], "#if (TILDE_USE_EXTENDED)");
            assert_eq!(block[3], "#endif");
        }
    }

    #[test]
    fn extended_glyphs_sit_inside_guard() {
        let doc = FontDocument {
            extended_characters: true,
            ..document(vec![glyph(0x7e, vec![0x50]), glyph(0x7f, vec![0xf8])])
        };
        let text = export_header(&doc, "Ext").unwrap();

        assert!(text.contains("#define EXT_USE_EXTENDED 1\n"));
        let block = array_block(&text, "const uint8_t ExtBitmaps");
        assert_eq!(block[1], "#if (EXT_USE_EXTENDED)");
        assert!(block[2].starts_with("\t0xf8  "));
        assert_eq!(block[3], "#endif");
        assert_eq!(text.matches("#if (EXT_USE_EXTENDED)").count(), 2);
    }

    #[test]
    fn no_closing_guard_without_opening_guard() {
        let doc = document(vec![glyph(0x20, vec![0x00]), glyph(0x21, vec![0x80])]);
        let text = export_header(&doc, "Plain").unwrap();

        assert!(!text.contains("#if"));
        assert!(!text.contains("#endif"));
        assert!(text.contains("#define PLAIN_USE_EXTENDED 0\n"));
    }

    #[test]
    fn font_struct_references_arrays() {
        let doc = document(vec![glyph(0x41, vec![0x00]), glyph(0x20, vec![0x00])]);
        let text = export_header(&doc, "Ref").unwrap();

        let tail = "\
const GFXfont Ref PROGMEM =
{
\t(uint8_t*)RefBitmaps,
\t(GFXglyph*)RefGlyphs,
\t0x20, /* First ASCII Character */
\t0x41, /* Last ASCII Character */
\t0x05  /* Vertical Spacing */
};
";
        assert!(text.ends_with(tail), "{text}");
        assert!(text.contains("/* {offset, width, height, advance cursor, x offset, y offset} */\n"));
    }
}
