use gfxfont_data::{CellHeight, FontDocument, Glyph, GlyphView};
use tracing::warn;

/// Renders the selected glyphs (all when `codes` is empty) as text blocks.
pub fn render_preview(document: &FontDocument, codes: &[u32], mode: CellHeight) -> String {
    let cell_width = document.font_width.max(document.max_glyph_width());
    let cell_height = document.cell_height(mode);

    let glyphs: Vec<&Glyph> = document
        .sorted_items()
        .into_iter()
        .filter(|g| codes.is_empty() || codes.contains(&g.ascii_code))
        .collect();

    let mut out = String::new();
    for glyph in glyphs {
        out.push_str(&format!("{} {}\n", glyph.hex(), glyph));

        match GlyphView::render(glyph, cell_width, cell_height) {
            Ok(view) => out.push_str(&view.to_text()),
            Err(e) => {
                warn!(ascii_code = glyph.ascii_code, error = %e, "Glyph cannot be previewed");
                out.push_str(&format!("  ({e})\n"));
            },
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> FontDocument {
        let mut exclamation = Glyph::new(0x21, 1, 3);
        exclamation.font_bitmap = vec![0x01, 0x00, 0x01];
        exclamation.x_advance = 2;
        exclamation.y_offset = -3;

        let wide = Glyph::new(0x22, 9, 1);

        FontDocument {
            font_width: 2,
            font_height: 4,
            items: vec![wide, exclamation],
            ..FontDocument::new()
        }
    }

    #[test]
    fn renders_selected_glyph() {
        let out = render_preview(&document(), &[0x21], CellHeight::Document);

        // canvas is 9 wide (widest glyph), baseline on row 3
        let expected = "\
0x21 ! [0, 1, 3, 2, 0, -3]
         
#........
.........
#.|......

";
        assert_eq!(out, expected);
    }

    #[test]
    fn unsupported_glyphs_are_reported_inline() {
        let out = render_preview(&document(), &[], CellHeight::TallestGlyph);
        assert!(out.starts_with("0x21 !"));
        assert!(out.contains("0x22 \" [0, 9, 1, 0, 0, 0]\n  (Unsupported glyph width 9"));
    }
}
