//! Text normalization applied before layout.
//!
//! The PDF renderer writes base-14 fonts with WinAnsi encoding, so its input is
//! folded to 7-bit ASCII first. Folding is lossy: characters with no ASCII base
//! form are dropped, never reported.

use unicode_normalization::UnicodeNormalization;

/// Bullet glyph models like to emit instead of a Markdown list marker.
pub const BULLET_GLYPH: char = '\u{2022}';

/// Replaces every bullet glyph with a `"- "` list marker.
pub fn replace_bullet_glyphs(text: &str) -> String {
    text.replace(BULLET_GLYPH, "- ")
}

/// NFKD-decomposes `text` and keeps only ASCII characters.
///
/// Accented letters become their base letter, compatibility forms (ligatures,
/// full-width digits) become their plain equivalents, and anything else is dropped.
pub fn ascii_fold(text: &str) -> String {
    text.nfkd().filter(char::is_ascii).collect()
}

/// The full pre-layout pass: bullet glyphs first, then the ASCII fold.
pub fn normalize_for_layout(text: &str) -> String {
    ascii_fold(&replace_bullet_glyphs(text))
}
