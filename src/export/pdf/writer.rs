//! Low-level PDF document assembly.
//!
//! Pages are described as flat lists of draw operations; this module turns
//! them into a complete PDF file: catalog, page tree, uncompressed content
//! streams, Type1 font dictionaries, cross-reference table, and trailer.
//! Offsets in the xref are byte-exact, so everything is written through one
//! buffer with positions recorded as objects begin.

use super::fonts::Font;
use crate::error::{Error, Result};
use log::debug;

/// RGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// One draw operation on a page.
#[derive(Debug, Clone)]
pub enum DrawOp {
    /// Text run at a baseline position
    Text {
        x: f32,
        y: f32,
        size: f32,
        font: Font,
        color: Color,
        text: String,
    },
    /// Straight stroked line
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
}

/// A single page: its media box size plus draw operations in paint order.
#[derive(Debug, Clone)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }
}

/// Escape the three characters with meaning inside a PDF literal string.
fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            // Streams are written as single-byte text; anything outside
            // printable ASCII cannot round-trip through a literal string
            c if !(' '..='~').contains(&c) => out.push('?'),
            c => out.push(c),
        }
    }
    out
}

fn format_number(value: f32) -> String {
    if (value - value.round()).abs() < 0.001 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.2}")
    }
}

/// Render a page's operations as a content stream body.
fn content_stream(page: &Page) -> String {
    let mut stream = String::new();
    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, size, font, color, text } => {
                stream.push_str(&format!(
                    "{} {} {} rg\n",
                    format_number(color.r),
                    format_number(color.g),
                    format_number(color.b)
                ));
                stream.push_str("BT\n");
                stream.push_str(&format!(
                    "/{} {} Tf\n",
                    font.resource_name(),
                    format_number(*size)
                ));
                stream.push_str(&format!(
                    "{} {} Td\n",
                    format_number(*x),
                    format_number(*y)
                ));
                stream.push_str(&format!("({}) Tj\n", escape_string(text)));
                stream.push_str("ET\n");
            },
            DrawOp::Line { x1, y1, x2, y2, width, color } => {
                stream.push_str(&format!("{} w\n", format_number(*width)));
                stream.push_str(&format!(
                    "{} {} {} RG\n",
                    format_number(color.r),
                    format_number(color.g),
                    format_number(color.b)
                ));
                stream.push_str(&format!(
                    "{} {} m\n{} {} l\nS\n",
                    format_number(*x1),
                    format_number(*y1),
                    format_number(*x2),
                    format_number(*y2)
                ));
            },
        }
    }
    stream
}

/// Serialize pages to a complete PDF file.
///
/// `fonts` declares the font set the document embeds; any operation that
/// references an undeclared font is an [`Error::Font`].
pub fn write_document(pages: &[Page], fonts: &[Font]) -> Result<Vec<u8>> {
    for page in pages {
        for op in &page.ops {
            if let DrawOp::Text { font, .. } = op {
                if !fonts.contains(font) {
                    return Err(Error::Font(font.base_name().to_string()));
                }
            }
        }
    }

    let num_pages = pages.len();
    let num_fonts = fonts.len();
    // Object layout: 1 catalog, 2 page tree, then pages, contents, fonts
    let page_obj = |i: usize| 3 + i;
    let content_obj = |i: usize| 3 + num_pages + i;
    let font_obj = |i: usize| 3 + 2 * num_pages + i;
    let total_objects = 2 + 2 * num_pages + num_fonts;

    let mut buf: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::with_capacity(total_objects);

    buf.extend_from_slice(b"%PDF-1.4\n");
    // High-bit comment bytes mark the file as binary
    buf.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

    // 1: catalog
    offsets.push(buf.len());
    buf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    // 2: page tree
    offsets.push(buf.len());
    let kids: Vec<String> = (0..num_pages).map(|i| format!("{} 0 R", page_obj(i))).collect();
    buf.extend_from_slice(
        format!(
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids.join(" "),
            num_pages
        )
        .as_bytes(),
    );

    // Page objects
    let font_entries: Vec<String> = fonts
        .iter()
        .enumerate()
        .map(|(i, f)| format!("/{} {} 0 R", f.resource_name(), font_obj(i)))
        .collect();
    let font_dict = font_entries.join(" ");

    for (i, page) in pages.iter().enumerate() {
        offsets.push(buf.len());
        buf.extend_from_slice(
            format!(
                "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << {} >> >> /Contents {} 0 R >>\nendobj\n",
                page_obj(i),
                format_number(page.width),
                format_number(page.height),
                font_dict,
                content_obj(i)
            )
            .as_bytes(),
        );
    }

    // Content streams, uncompressed
    for (i, page) in pages.iter().enumerate() {
        let stream = content_stream(page);
        offsets.push(buf.len());
        buf.extend_from_slice(
            format!(
                "{} 0 obj\n<< /Length {} >>\nstream\n",
                content_obj(i),
                stream.len()
            )
            .as_bytes(),
        );
        buf.extend_from_slice(stream.as_bytes());
        buf.extend_from_slice(b"endstream\nendobj\n");
    }

    // Font dictionaries
    for (i, font) in fonts.iter().enumerate() {
        offsets.push(buf.len());
        buf.extend_from_slice(
            format!(
                "{} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /{} \
                 /Encoding /WinAnsiEncoding >>\nendobj\n",
                font_obj(i),
                font.base_name()
            )
            .as_bytes(),
        );
    }

    // Cross-reference table
    let xref_offset = buf.len();
    buf.extend_from_slice(format!("xref\n0 {}\n", total_objects + 1).as_bytes());
    buf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        buf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }

    buf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            total_objects + 1,
            xref_offset
        )
        .as_bytes(),
    );

    debug!(
        "wrote PDF: {} pages, {} objects, {} bytes",
        num_pages,
        total_objects,
        buf.len()
    );
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> Page {
        let mut page = Page::new(612.0, 792.0);
        page.ops.push(DrawOp::Text {
            x: 50.0,
            y: 742.0,
            size: 12.0,
            font: Font::Helvetica,
            color: Color::BLACK,
            text: "hello (world) \\ test".to_string(),
        });
        page.ops.push(DrawOp::Line {
            x1: 50.0,
            y1: 700.0,
            x2: 562.0,
            y2: 700.0,
            width: 1.0,
            color: Color::new(0.7, 0.7, 0.7),
        });
        page
    }

    #[test]
    fn test_document_structure() {
        let bytes = write_document(&[sample_page()], &[Font::Helvetica]).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.trim_end().ends_with("%%EOF"));
        assert!(text.contains("/Count 1"));
        assert!(text.contains("/BaseFont /Helvetica"));
        assert!(text.contains("xref"));
    }

    #[test]
    fn test_string_escaping() {
        let bytes = write_document(&[sample_page()], &[Font::Helvetica]).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(hello \\(world\\) \\\\ test) Tj"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        // Offsets are byte positions in the raw file, so check against the
        // bytes rather than a lossy string view
        let bytes = write_document(&[sample_page()], &[Font::Helvetica]).unwrap();
        let needle = b"xref\n";
        let xref_start = bytes
            .windows(needle.len())
            .position(|w| w == needle)
            .unwrap();

        let table = String::from_utf8_lossy(&bytes[xref_start..]);
        let entries: Vec<&str> = table
            .lines()
            .skip(2) // "xref" and "0 N" header lines
            .take_while(|l| l.ends_with("n ") || l.ends_with("f "))
            .collect();

        for (i, entry) in entries.iter().enumerate().skip(1) {
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{i} 0 obj");
            assert_eq!(&bytes[offset..offset + expected.len()], expected.as_bytes());
        }
    }

    #[test]
    fn test_undeclared_font_is_an_error() {
        let mut page = Page::new(612.0, 792.0);
        page.ops.push(DrawOp::Text {
            x: 0.0,
            y: 0.0,
            size: 10.0,
            font: Font::HelveticaBold,
            color: Color::BLACK,
            text: "x".to_string(),
        });
        let err = write_document(&[page], &[Font::Helvetica]).unwrap_err();
        assert!(matches!(err, Error::Font(name) if name == "Helvetica-Bold"));
    }

    #[test]
    fn test_page_count_matches() {
        let pages = vec![sample_page(), sample_page(), sample_page()];
        let bytes = write_document(&pages, &[Font::Helvetica]).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 3"));
    }

    #[test]
    fn test_non_ascii_chars_are_replaced() {
        assert_eq!(escape_string("caf\u{00e9} \u{4e16}"), "caf? ?");
    }
}
