//! Line-oriented PDF renderer.
//!
//! # Architecture
//! - `layout_document` normalizes the text, classifies each line and places it,
//!   producing plain `PageLayout` records. A `Cursor` (font style, size, vertical
//!   offset) is threaded through the loop; nothing else carries layout state.
//! - `write_pdf` serializes the page records with `pdf-writer`. No info
//!   dictionary or timestamps are written, so identical input yields identical bytes.
//!
//! Positions are millimetres from the top-left page corner until serialization.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use crate::render::classify::{classify_line, LineKind, BULLET_MARKER};
use crate::render::font_metrics::{get_metrics, FontStyle, PT_PER_MM};
use crate::render::normalize::normalize_for_layout;
use crate::render::split_lines;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry (A4, millimetres)
// ────────────────────────────────────────────────────────────────────────────

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 10.0;
/// A line that would end below `PAGE_HEIGHT_MM - BREAK_MARGIN_MM` moves to a new page.
pub const BREAK_MARGIN_MM: f32 = 15.0;
pub const BULLET_INDENT_MM: f32 = 5.0;

const BODY_SIZE_PT: f32 = 11.0;
const BODY_LINE_MM: f32 = 6.0;
const BLANK_GAP_MM: f32 = 4.0;

const H2_SIZE_PT: f32 = 14.0;
const H2_LINE_MM: f32 = 8.0;
const H2_GAP_BEFORE_MM: f32 = 4.0;

const H3_SIZE_PT: f32 = 12.0;
const H3_LINE_MM: f32 = 7.0;

const HEADING_GAP_AFTER_MM: f32 = 2.0;

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");

// ────────────────────────────────────────────────────────────────────────────
// Layout records
// ────────────────────────────────────────────────────────────────────────────

/// One positioned line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x_mm: f32,
    /// Baseline, measured down from the top edge of the page.
    pub baseline_mm: f32,
    pub style: FontStyle,
    pub size_pt: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub runs: Vec<TextRun>,
}

/// Transient render cursor. Lives for exactly one `layout_document` call.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cursor {
    style: FontStyle,
    size_pt: f32,
    /// Top of the next line, from the top edge of the current page.
    y_mm: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            style: FontStyle::Regular,
            size_pt: BODY_SIZE_PT,
            y_mm: MARGIN_MM,
        }
    }

    fn set_font(&mut self, style: FontStyle, size_pt: f32) {
        self.style = style;
        self.size_pt = size_pt;
    }

    fn reset_font(&mut self) {
        self.set_font(FontStyle::Regular, BODY_SIZE_PT);
    }

    fn gap(&mut self, height_mm: f32) {
        self.y_mm += height_mm;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry points
// ────────────────────────────────────────────────────────────────────────────

/// Renders free-form, Markdown-like text into PDF bytes.
///
/// Never fails: unrepresentable characters are folded away and overflow
/// paginates. Empty input still produces a single blank page.
pub fn render_pdf(text: &str) -> Vec<u8> {
    write_pdf(&layout_document(text))
}

/// Lays out `text` into pages without serializing them.
pub fn layout_document(text: &str) -> Vec<PageLayout> {
    let normalized = normalize_for_layout(text);
    let mut pages = vec![PageLayout::default()];
    let mut cursor = Cursor::new();
    let full_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

    for line in split_lines(&normalized) {
        match classify_line(line) {
            LineKind::Heading2(title) => {
                cursor.gap(H2_GAP_BEFORE_MM);
                cursor.set_font(FontStyle::Bold, H2_SIZE_PT);
                emit_block(&mut pages, &mut cursor, MARGIN_MM, full_width, title, H2_LINE_MM);
                cursor.gap(HEADING_GAP_AFTER_MM);
                cursor.reset_font();
            }
            LineKind::Heading3(title) => {
                cursor.set_font(FontStyle::Bold, H3_SIZE_PT);
                emit_block(&mut pages, &mut cursor, MARGIN_MM, full_width, title, H3_LINE_MM);
                cursor.gap(HEADING_GAP_AFTER_MM);
                cursor.reset_font();
            }
            LineKind::Bullet(content) => {
                let text = format!("{BULLET_MARKER}{content}");
                emit_block(
                    &mut pages,
                    &mut cursor,
                    MARGIN_MM + BULLET_INDENT_MM,
                    full_width - BULLET_INDENT_MM,
                    &text,
                    BODY_LINE_MM,
                );
            }
            LineKind::Blank => cursor.gap(BLANK_GAP_MM),
            LineKind::Plain(content) => {
                emit_block(&mut pages, &mut cursor, MARGIN_MM, full_width, content, BODY_LINE_MM);
            }
        }
    }

    pages
}

// ────────────────────────────────────────────────────────────────────────────
// Emission
// ────────────────────────────────────────────────────────────────────────────

/// Wraps `text` to `width_mm` in the cursor's current font and places each
/// visual line. Empty text still consumes one line of height.
fn emit_block(
    pages: &mut Vec<PageLayout>,
    cursor: &mut Cursor,
    x_mm: f32,
    width_mm: f32,
    text: &str,
    line_height_mm: f32,
) {
    let lines = get_metrics(cursor.style).wrap(text, cursor.size_pt, width_mm);
    if lines.is_empty() {
        emit_line(pages, cursor, x_mm, String::new(), line_height_mm);
        return;
    }
    for line in lines {
        emit_line(pages, cursor, x_mm, line, line_height_mm);
    }
}

fn emit_line(
    pages: &mut Vec<PageLayout>,
    cursor: &mut Cursor,
    x_mm: f32,
    text: String,
    line_height_mm: f32,
) {
    if cursor.y_mm + line_height_mm > PAGE_HEIGHT_MM - BREAK_MARGIN_MM {
        pages.push(PageLayout::default());
        cursor.y_mm = MARGIN_MM;
    }

    // Vertically centre the glyphs in the line box.
    let size_mm = cursor.size_pt / PT_PER_MM;
    let baseline_mm = cursor.y_mm + 0.5 * line_height_mm + 0.3 * size_mm;

    if !text.is_empty() {
        if let Some(page) = pages.last_mut() {
            page.runs.push(TextRun {
                x_mm,
                baseline_mm,
                style: cursor.style,
                size_pt: cursor.size_pt,
                text,
            });
        }
    }
    cursor.y_mm += line_height_mm;
}

// ────────────────────────────────────────────────────────────────────────────
// Serialization
// ────────────────────────────────────────────────────────────────────────────

fn font_resource(style: FontStyle) -> Name<'static> {
    match style {
        FontStyle::Regular => REGULAR_FONT,
        FontStyle::Bold => BOLD_FONT,
    }
}

fn write_pdf(pages: &[PageLayout]) -> Vec<u8> {
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let regular_id = Ref::new(3);
    let bold_id = Ref::new(4);
    let mut next_ref = 5;

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);

    let mut page_ids = Vec::with_capacity(pages.len());
    for layout in pages {
        let page_id = Ref::new(next_ref);
        let content_id = Ref::new(next_ref + 1);
        next_ref += 2;
        page_ids.push(page_id);

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(
            0.0,
            0.0,
            PAGE_WIDTH_MM * PT_PER_MM,
            PAGE_HEIGHT_MM * PT_PER_MM,
        ));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources()
            .fonts()
            .pair(REGULAR_FONT, regular_id)
            .pair(BOLD_FONT, bold_id);
        page.finish();

        pdf.stream(content_id, &page_content(layout));
    }

    let page_count = page_ids.len() as i32;
    pdf.pages(page_tree_id).kids(page_ids).count(page_count);

    for (id, style) in [(regular_id, FontStyle::Regular), (bold_id, FontStyle::Bold)] {
        pdf.type1_font(id)
            .base_font(Name(style.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    pdf.finish()
}

fn page_content(layout: &PageLayout) -> Vec<u8> {
    let mut content = Content::new();
    for run in &layout.runs {
        content.begin_text();
        content.set_font(font_resource(run.style), run.size_pt);
        content.next_line(
            run.x_mm * PT_PER_MM,
            (PAGE_HEIGHT_MM - run.baseline_mm) * PT_PER_MM,
        );
        content.show(Str(run.text.as_bytes()));
        content.end_text();
    }
    content.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
