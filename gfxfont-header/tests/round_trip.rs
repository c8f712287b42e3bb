use gfxfont_data::{Glyph, PixelGrid, grid_from_glyph};
use gfxfont_header::{FontDocument, HeaderImporter, export_header, import_header};

type GlyphTuple = (u32, u32, u32, i32, i32, i32, Vec<u8>);

fn tuples(document: &FontDocument) -> Vec<GlyphTuple> {
    document
        .sorted_items()
        .into_iter()
        .map(|g| {
            (
                g.ascii_code,
                g.width,
                g.height,
                g.x_advance,
                g.x_offset,
                g.y_offset,
                g.font_bitmap.clone(),
            )
        })
        .collect()
}

/// A font covering `0x20..=last` with a distinct pattern per glyph.
fn patterned_font(last: u32) -> FontDocument {
    let items = (Glyph::FIRST_ASCII..=last)
        .map(|code| {
            let height = 3 + code % 5;
            let width = 1 + code % 8;
            let mut glyph = Glyph {
                x_advance: width as i32 + 1,
                x_offset: (code % 2) as i32,
                y_offset: -(height as i32),
                ..Glyph::new(code, width, height)
            };

            let mut grid = PixelGrid::new(width, height).unwrap();
            for row in 0..height {
                grid.set(row, (code + row) % width, true);
            }
            glyph.apply_grid(&grid).unwrap();
            glyph
        })
        .collect();

    let mut document = FontDocument {
        description: "Round trip test font with a description long enough to wrap across \
                      more than one line of the generated header comment."
            .to_string(),
        items,
        ..FontDocument::new()
    };
    document.reindex();
    document.font_width = document.max_glyph_width();
    document.font_height = document.max_glyph_height();
    document
}

#[test]
fn export_then_import_preserves_glyphs() {
    let original = patterned_font(Glyph::LAST_ASCII);
    let header = export_header(&original, "RoundTrip").unwrap();
    let imported = import_header(&header).unwrap();

    assert_eq!(tuples(&imported), tuples(&original));
    assert_eq!(imported.font_width, original.font_width);
    assert_eq!(imported.font_height, original.font_height);
}

#[test]
fn extended_block_survives_round_trip() {
    let original = FontDocument {
        extended_characters: true,
        ..patterned_font(0x85)
    };
    let header = export_header(&original, "Wide").unwrap();

    assert_eq!(header.matches("#if (WIDE_USE_EXTENDED)").count(), 2);
    assert_eq!(header.matches("#endif").count(), 2);

    let imported = HeaderImporter::new()
        .strict(true)
        .import_str(&header)
        .unwrap();
    assert!(imported.extended_characters);
    assert_eq!(tuples(&imported), tuples(&original));
}

#[test]
fn template_font_round_trips() {
    let original = FontDocument::new_template();
    let header = export_header(&original, "Blank").unwrap();
    let imported = import_header(&header).unwrap();

    assert_eq!(tuples(&imported), tuples(&original));
    assert!(header.contains("\t0x20, /* First ASCII Character */\n"));
    assert!(header.contains("\t0x7e, /* Last ASCII Character */\n"));
    assert!(header.contains("\t0x07  /* Vertical Spacing */\n"));
}

#[test]
fn reexport_is_stable() {
    let original = patterned_font(0x40);
    let first = export_header(&original, "Stable").unwrap();

    let imported = FontDocument {
        description: original.description.clone(),
        date_time_created: original.date_time_created,
        last_modified_date_time: original.last_modified_date_time,
        ..import_header(&first).unwrap()
    };
    let second = export_header(&imported, "Stable").unwrap();

    assert_eq!(first, second);
}

#[test]
fn imported_glyph_decodes_to_diagonal() {
    let header = "\
const uint8_t DiagBitmaps[] PROGMEM =
{
\t0x80, 0x40, 0x20, 0x10, 0x08  /* 0x20   */
};
const GFXglyph DiagGlyphs[] PROGMEM =
{
\t{ 0, 8, 5, 5, 0, -4 }    /* 0x20   */
};
";
    let document = import_header(header).unwrap();
    let glyph = &document.items[0];
    assert_eq!(glyph.font_bitmap, vec![0x80, 0x40, 0x20, 0x10, 0x08]);

    let grid = grid_from_glyph(glyph).unwrap();
    assert_eq!((grid.height(), grid.width()), (5, 8));
    for (row, cells) in grid.rows().enumerate() {
        let on: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(column, _)| column)
            .collect();
        assert_eq!(on, vec![row]);
    }
}
