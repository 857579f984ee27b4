//! DOCX paragraph sink: one unstyled paragraph per source line.
//!
//! Unlike the PDF path this keeps the original Unicode text, and blank lines
//! become empty paragraphs. Only characters XML cannot represent are dropped.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run};

use crate::render::{split_lines, RenderError};

/// Paragraph texts in document order.
pub fn paragraphs(text: &str) -> Vec<&str> {
    split_lines(text).collect()
}

/// Packs `text` into a `.docx` archive.
pub fn render_docx(text: &str) -> Result<Vec<u8>, RenderError> {
    let docx = paragraphs(text).into_iter().fold(Docx::new(), |docx, line| {
        let line = xml_text(line);
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)))
    });

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| RenderError::Docx(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Drops characters XML 1.0 cannot carry (C0 controls other than tab, and
/// the U+FFFE/U+FFFF noncharacters). Word rejects a document that contains them.
fn xml_text(line: &str) -> String {
    line.chars().filter(|&c| is_xml_char(c)).collect()
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}
