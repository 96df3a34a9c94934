use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};

use crate::document::{DocumentFormat, ExtractedContent, MetadataKey};
use crate::error::{Error, Result};

/// Extract text from a .docx archive.
///
/// Only body-level paragraphs are read. Blank paragraphs are dropped from
/// the text but still counted under "Paragraphs".
pub fn extract_docx(bytes: &[u8]) -> Result<ExtractedContent> {
    let docx =
        read_docx(bytes).map_err(|e| Error::decode(DocumentFormat::Word, e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .collect();

    let paragraph_count = paragraphs.len();
    let text = paragraphs
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<String>>()
        .join("\n");

    Ok(ExtractedContent::new(
        DocumentFormat::Word,
        text,
        Some((MetadataKey::Paragraphs, paragraph_count)),
    ))
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    collect_runs(&para.children, &mut text);
    text
}

// Runs inside a hyperlink belong to the same sentence as their neighbours.
fn collect_runs(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for rc in &run.children {
                    match rc {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => collect_runs(&link.children, out),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run};
    use std::io::Cursor;

    fn pack(docx: Docx) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    fn para(text: &str) -> Paragraph {
        Paragraph::new().add_run(Run::new().add_text(text))
    }

    #[test]
    fn test_blank_paragraphs_counted_not_joined() {
        let bytes = pack(
            Docx::new()
                .add_paragraph(para("Heading"))
                .add_paragraph(Paragraph::new())
                .add_paragraph(para("   "))
                .add_paragraph(para("Closing line")),
        );

        let content = extract_docx(&bytes).unwrap();
        assert_eq!(content.text(), "Heading\nClosing line");
        assert_eq!(content.count(MetadataKey::Paragraphs), Some(4));
        assert_eq!(content.count(MetadataKey::Words), Some(3));
    }

    #[test]
    fn test_runs_concatenate_within_paragraph() {
        let bytes = pack(
            Docx::new().add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Sum"))
                    .add_run(Run::new().add_text("marize")),
            ),
        );

        let content = extract_docx(&bytes).unwrap();
        assert_eq!(content.text(), "Summarize");
        assert_eq!(content.count(MetadataKey::Paragraphs), Some(1));
    }

    #[test]
    fn test_not_a_docx() {
        let err = extract_docx(b"this is not a zip archive").unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                format: DocumentFormat::Word,
                ..
            }
        ));
    }
}
