//! Line classification for the document renderer.
//!
//! Rules are checked in priority order and the first match wins:
//! Heading-2 (`"## "` prefix), Heading-3 (`"### "` prefix), Bullet (trimmed line
//! starts with `"- "`), Blank (empty or whitespace-only), Plain.
//! Heading prefixes are matched on the raw line; leading whitespace disqualifies them.

pub const HEADING2_PREFIX: &str = "## ";
pub const HEADING3_PREFIX: &str = "### ";
pub const BULLET_MARKER: &str = "- ";

/// The kind of a single source line, borrowing the text the renderer will emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Text after the `"## "` prefix.
    Heading2(&'a str),
    /// Text after the `"### "` prefix.
    Heading3(&'a str),
    /// Content after the `"- "` marker of the trimmed line.
    Bullet(&'a str),
    Blank,
    /// The full line.
    Plain(&'a str),
}

/// Classifies one line. Pure: the result depends on nothing but `line`.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(rest) = line.strip_prefix(HEADING2_PREFIX) {
        return LineKind::Heading2(rest);
    }
    if let Some(rest) = line.strip_prefix(HEADING3_PREFIX) {
        return LineKind::Heading3(rest);
    }
    let trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix(BULLET_MARKER) {
        return LineKind::Bullet(rest);
    }
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    LineKind::Plain(line)
}
