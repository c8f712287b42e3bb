use chrono::{Datelike, NaiveDateTime};
use gfxfont_data::FontDocument;

/// Column at which description lines are wrapped.
pub(crate) const WRAP_COLUMN: usize = 72;

const HEADER_TEMPLATE: &str = "\
/*
 * {FontName}
 *
 * Created:       {DateCreated}
 * Last Modified: {LastModified}
 * Version:       {Version}
{Description} */";

const COPYRIGHT_TEMPLATE: &str = "\
/*
 * Copyright (C) {Year} {Holder}. All rights reserved.
 */";

/// Renders the copyright notice placed above the metadata block. The year is
/// taken from the last modification so that re-exports are stable.
pub(crate) fn render_copyright(document: &FontDocument, holder: &str) -> String {
    COPYRIGHT_TEMPLATE
        .replace("{Year}", &document.last_modified_date_time.year().to_string())
        .replace("{Holder}", &comment_safe(holder))
}

/// Renders the comment block opening a generated header.
pub(crate) fn render_header(document: &FontDocument, name: &str) -> String {
    let lines = wrap_words(&document.description, WRAP_COLUMN);
    let description = if lines.is_empty() {
        String::new()
    } else {
        let body: String = lines
            .iter()
            .map(|line| format!(" * {}\n", comment_safe(line)))
            .collect();
        format!(" *\n{body}")
    };

    HEADER_TEMPLATE
        .replace("{FontName}", name)
        .replace("{DateCreated}", &timestamp(&document.date_time_created))
        .replace("{LastModified}", &timestamp(&document.last_modified_date_time))
        .replace("{Version}", &document.version())
        .replace("{Description}", &description)
}

/// Breaks up `*/` so free text cannot terminate the enclosing comment.
fn comment_safe(text: &str) -> String {
    text.replace("*/", "* /")
}

/// Long date followed by short time, e.g. `Friday, May 1, 2020 3:04 PM`.
pub(crate) fn timestamp(dt: &NaiveDateTime) -> String {
    dt.format("%A, %B %-d, %Y %-I:%M %p").to_string()
}

/// Greedy word wrap: a line is broken at the first space reached once it
/// holds at least `width` characters; that space is dropped. Embedded line
/// breaks are kept.
pub(crate) fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut count = 0;

        for c in paragraph.chars() {
            if c == ' ' && count >= width {
                lines.push(std::mem::take(&mut current));
                count = 0;
            } else {
                current.push(c);
                count += 1;
            }
        }

        lines.push(current);
    }

    lines
}
