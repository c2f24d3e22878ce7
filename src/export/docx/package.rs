//! DOCX packaging: block tree to OOXML zip archive.
//!
//! A minimal but valid WordprocessingML package: `[Content_Types].xml`,
//! the package relationships, and `word/document.xml`. The document part
//! is written through quick-xml's event writer so escaping is handled for
//! us; the two fixed parts are static strings.

use super::{build_document, DocBlock};
use crate::error::{Error, Result};
use crate::record::EvaluationRecord;
use log::info;
use quick_xml::events::{BytesDecl, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const BULLET_INDENT: &str = "360";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

fn xml_err(e: quick_xml::Error) -> Error {
    Error::Package(e.to_string())
}

fn zip_err(e: zip::result::ZipError) -> Error {
    Error::Package(e.to_string())
}

/// Run-level styling for one text run.
#[derive(Debug, Clone, Copy, Default)]
struct RunStyle<'a> {
    bold: bool,
    italic: bool,
    color: Option<&'a str>,
    /// Half-points
    size: u32,
}

/// Paragraph-level styling.
#[derive(Debug, Clone, Copy, Default)]
struct ParaStyle {
    centered: bool,
    indented: bool,
}

fn write_run<W: Write>(writer: &mut Writer<W>, text: &str, style: RunStyle) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("w:r")))
        .map_err(xml_err)?;

    writer
        .write_event(Event::Start(BytesStart::new("w:rPr")))
        .map_err(xml_err)?;
    if style.bold {
        writer
            .write_event(Event::Empty(BytesStart::new("w:b")))
            .map_err(xml_err)?;
    }
    if style.italic {
        writer
            .write_event(Event::Empty(BytesStart::new("w:i")))
            .map_err(xml_err)?;
    }
    if let Some(color) = style.color {
        let mut el = BytesStart::new("w:color");
        el.push_attribute(("w:val", color));
        writer.write_event(Event::Empty(el)).map_err(xml_err)?;
    }
    if style.size > 0 {
        let size = style.size.to_string();
        let mut el = BytesStart::new("w:sz");
        el.push_attribute(("w:val", size.as_str()));
        writer.write_event(Event::Empty(el)).map_err(xml_err)?;
    }
    writer
        .write_event(Event::End(BytesStart::new("w:rPr").to_end()))
        .map_err(xml_err)?;

    let mut text_el = BytesStart::new("w:t");
    text_el.push_attribute(("xml:space", "preserve"));
    writer
        .write_event(Event::Start(text_el))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesStart::new("w:t").to_end()))
        .map_err(xml_err)?;

    writer
        .write_event(Event::End(BytesStart::new("w:r").to_end()))
        .map_err(xml_err)?;
    Ok(())
}

fn write_paragraph<W: Write>(
    writer: &mut Writer<W>,
    para: ParaStyle,
    runs: &[(&str, RunStyle)],
) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("w:p")))
        .map_err(xml_err)?;

    if para.centered || para.indented {
        writer
            .write_event(Event::Start(BytesStart::new("w:pPr")))
            .map_err(xml_err)?;
        if para.centered {
            let mut el = BytesStart::new("w:jc");
            el.push_attribute(("w:val", "center"));
            writer.write_event(Event::Empty(el)).map_err(xml_err)?;
        }
        if para.indented {
            let mut el = BytesStart::new("w:ind");
            el.push_attribute(("w:left", BULLET_INDENT));
            writer.write_event(Event::Empty(el)).map_err(xml_err)?;
        }
        writer
            .write_event(Event::End(BytesStart::new("w:pPr").to_end()))
            .map_err(xml_err)?;
    }

    for &(text, style) in runs {
        write_run(writer, text, style)?;
    }

    writer
        .write_event(Event::End(BytesStart::new("w:p").to_end()))
        .map_err(xml_err)?;
    Ok(())
}

fn write_block<W: Write>(writer: &mut Writer<W>, block: &DocBlock) -> Result<()> {
    match block {
        DocBlock::Title { text, size, bold, color } => write_paragraph(
            writer,
            ParaStyle { centered: true, indented: false },
            &[(
                text,
                RunStyle {
                    bold: *bold,
                    color: color.as_deref(),
                    size: *size,
                    ..Default::default()
                },
            )],
        ),
        DocBlock::Heading(text) => write_paragraph(
            writer,
            ParaStyle::default(),
            &[(
                text,
                RunStyle {
                    bold: true,
                    color: Some("000080"),
                    size: 24,
                    ..Default::default()
                },
            )],
        ),
        DocBlock::FieldRow { label, value } => write_paragraph(
            writer,
            ParaStyle::default(),
            &[
                (
                    &format!("{label}: "),
                    RunStyle { bold: true, size: 20, ..Default::default() },
                ),
                (value, RunStyle { size: 20, ..Default::default() }),
            ],
        ),
        DocBlock::Label { text, size, color } => write_paragraph(
            writer,
            ParaStyle::default(),
            &[(
                text,
                RunStyle {
                    bold: true,
                    color: color.as_deref(),
                    size: *size,
                    ..Default::default()
                },
            )],
        ),
        DocBlock::Bullet(text) => write_paragraph(
            writer,
            ParaStyle { centered: false, indented: true },
            &[(
                &format!("- {text}"),
                RunStyle { size: 18, ..Default::default() },
            )],
        ),
        DocBlock::Body(text) => write_paragraph(
            writer,
            ParaStyle { centered: false, indented: true },
            &[(text, RunStyle { size: 18, ..Default::default() })],
        ),
        DocBlock::Placeholder(text) => write_paragraph(
            writer,
            ParaStyle::default(),
            &[(
                text,
                RunStyle {
                    italic: true,
                    color: Some("666666"),
                    size: 20,
                    ..Default::default()
                },
            )],
        ),
        DocBlock::Footer { text, color } => write_paragraph(
            writer,
            ParaStyle { centered: true, indented: false },
            &[(
                text,
                RunStyle {
                    italic: true,
                    color: Some(*color),
                    size: 16,
                    ..Default::default()
                },
            )],
        ),
    }
}

/// Serialize the block tree to the `word/document.xml` part.
fn document_xml(blocks: &[DocBlock]) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(xml_err)?;

    let mut document = BytesStart::new("w:document");
    document.push_attribute(("xmlns:w", WORD_NS));
    writer
        .write_event(Event::Start(document))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("w:body")))
        .map_err(xml_err)?;

    for block in blocks {
        write_block(&mut writer, block)?;
    }

    writer
        .write_event(Event::Empty(BytesStart::new("w:sectPr")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesStart::new("w:body").to_end()))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesStart::new("w:document").to_end()))
        .map_err(xml_err)?;

    Ok(writer.into_inner().into_inner())
}

/// Render the record to DOCX bytes.
pub fn generate_docx(record: &EvaluationRecord) -> Result<Vec<u8>> {
    let blocks = build_document(record);
    let document = document_xml(&blocks)?;

    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    archive
        .start_file("[Content_Types].xml", options)
        .map_err(zip_err)?;
    archive.write_all(CONTENT_TYPES.as_bytes())?;

    archive.start_file("_rels/.rels", options).map_err(zip_err)?;
    archive.write_all(PACKAGE_RELS.as_bytes())?;

    archive
        .start_file("word/document.xml", options)
        .map_err(zip_err)?;
    archive.write_all(&document)?;

    let bytes = archive.finish().map_err(zip_err)?.into_inner();
    info!(
        "generated DOCX export: {} blocks, {} bytes",
        blocks.len(),
        bytes.len()
    );
    Ok(bytes)
}
