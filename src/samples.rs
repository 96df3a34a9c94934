use docx_rs::{Docx, Paragraph, Run};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::Cursor;

use crate::document::DocumentFormat;
use crate::error::{Error, Result};

const SHARED_LINE: &str = "You can upload your own PDF, TXT, or DOCX to get a summary and report.";

const PDF_LINE: &str = "This is a sample PDF file for testing PDF summarization.";
const TXT_LINE: &str = "This is a sample TXT file for testing text summarization.";
const DOCX_LINE: &str = "This is a sample DOCX file for testing Word summarization.";

// A4 in points; text starts near the top left like a default canvas.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const TEXT_X: i64 = 100;
const FIRST_LINE_Y: i64 = 750;
const LINE_SPACING: i64 = 20;
const FONT_SIZE: i64 = 12;

/// A generated demo file ready to hand to the user.
#[derive(Debug, Clone)]
pub struct SampleFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Build the canned sample for a format. Output is independent of any upload.
pub fn generate_sample(format: DocumentFormat) -> Result<SampleFile> {
    let bytes = match format {
        DocumentFormat::Pdf => render_pdf(&[vec![PDF_LINE, SHARED_LINE]])?,
        DocumentFormat::Text => sample_text().into_bytes(),
        DocumentFormat::Word => render_docx(&[DOCX_LINE, SHARED_LINE])?,
    };

    Ok(SampleFile {
        file_name: format!("sample.{}", format.extension()),
        bytes,
    })
}

pub fn sample_text() -> String {
    format!("{TXT_LINE}\n{SHARED_LINE}")
}

/// Render one PDF page per entry, drawing each line in Helvetica.
///
/// An empty entry produces a page with an empty content stream.
pub fn render_pdf(pages: &[Vec<&str>]) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in pages {
        let content = page_content(lines);
        let encoded = content.encode().map_err(pdf_error)?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| Error::SampleGeneration(DocumentFormat::Pdf, e.to_string()))?;
    Ok(buf)
}

// Each line is its own text object, so Td positions are absolute.
fn page_content(lines: &[&str]) -> Content {
    let mut operations = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let y = FIRST_LINE_Y - LINE_SPACING * i as i64;
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]));
        operations.push(Operation::new("Td", vec![TEXT_X.into(), y.into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

fn pdf_error(err: lopdf::Error) -> Error {
    Error::SampleGeneration(DocumentFormat::Pdf, err.to_string())
}

/// Render a .docx with one paragraph per entry.
pub fn render_docx(paragraphs: &[&str]) -> Result<Vec<u8>> {
    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
    });

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| Error::SampleGeneration(DocumentFormat::Word, e.to_string()))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        for format in DocumentFormat::ALL {
            let sample = generate_sample(format).unwrap();
            assert_eq!(sample.file_name, format!("sample.{}", format.extension()));
            assert!(!sample.bytes.is_empty());
        }
    }

    #[test]
    fn test_render_multi_page_pdf() {
        let bytes = render_pdf(&[vec!["first"], vec![], vec!["third"]]).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_magic_bytes() {
        let pdf = generate_sample(DocumentFormat::Pdf).unwrap();
        assert!(pdf.bytes.starts_with(b"%PDF-1.5"));

        let docx = generate_sample(DocumentFormat::Word).unwrap();
        assert!(docx.bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_sample_text_is_two_lines() {
        let text = sample_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![TXT_LINE, SHARED_LINE]);
    }

    #[test]
    fn test_page_content_positions() {
        let content = page_content(&["one", "two"]);
        let tds: Vec<&Operation> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Td")
            .collect();
        assert_eq!(tds.len(), 2);
        assert_eq!(tds[1].operands[1].as_i64().unwrap(), 730);
    }

    #[test]
    fn test_empty_page_has_no_operations() {
        assert!(page_content(&[]).operations.is_empty());
    }
}
