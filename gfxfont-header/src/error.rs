/// Errors raised while converting between header text and font documents.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A numeric token in the header could not be parsed.
    #[error("Malformed header at line {line}: {reason} (`{token}`)")]
    MalformedHeader {
        line: usize,
        token: String,
        reason: String,
    },

    /// Declared glyph heights disagree with the bitmap array length.
    #[error("Bitmap size mismatch: glyph heights sum to {expected} bytes, bitmap array has {actual}")]
    BitmapSizeMismatch { expected: usize, actual: usize },

    /// Two glyphs claim the same character code.
    #[error("Duplicate glyph for character code 0x{ascii_code:02x}")]
    DuplicateCode { ascii_code: u32 },

    /// Export needs at least one glyph.
    #[error("Cannot export a font without glyphs")]
    EmptyDocument,
}

impl Error {
    pub(crate) fn malformed_header(line: usize, token: &str, reason: impl Into<String>) -> Self {
        Self::MalformedHeader {
            line,
            token: token.trim().to_string(),
            reason: reason.into(),
        }
    }
}
