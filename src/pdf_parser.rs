use pdf_extract::extract_text_from_mem_by_pages;

use crate::document::{DocumentFormat, ExtractedContent, MetadataKey};
use crate::error::{Error, Result};

impl From<pdf_extract::OutputError> for Error {
    fn from(err: pdf_extract::OutputError) -> Self {
        Error::decode(DocumentFormat::Pdf, format!("{:?}", err))
    }
}

/// Extract text content from PDF bytes, one page at a time
pub fn extract_pdf(bytes: &[u8]) -> Result<ExtractedContent> {
    if !bytes.starts_with(b"%PDF") {
        return Err(Error::decode(DocumentFormat::Pdf, "missing %PDF header"));
    }

    let pages = extract_text_from_mem_by_pages(bytes)?;
    Ok(assemble_pages(pages))
}

/// Join per-page text into a single document.
///
/// Every page counts towards "Pages"; pages without any text contribute
/// nothing to the joined string. pdf-extract pads each page with blank
/// lines, which are stripped so they do not reach the counts.
fn assemble_pages(pages: Vec<String>) -> ExtractedContent {
    let page_count = pages.len();

    let text = pages
        .iter()
        .map(|p| p.trim_matches(|c: char| c == '\n' || c == '\r'))
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<&str>>()
        .join("\n");

    ExtractedContent::new(
        DocumentFormat::Pdf,
        text,
        Some((MetadataKey::Pages, page_count)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::render_pdf;

    #[test]
    fn test_not_a_pdf() {
        let result = extract_pdf(b"plain words, no header");
        assert!(matches!(
            result,
            Err(Error::Decode {
                format: DocumentFormat::Pdf,
                ..
            })
        ));
    }

    #[test]
    fn test_assemble_joins_pages_in_order() {
        let content = assemble_pages(vec![
            "first page".to_string(),
            "second page".to_string(),
            "third".to_string(),
        ]);
        assert_eq!(content.text(), "first page\nsecond page\nthird");
        assert_eq!(content.count(MetadataKey::Pages), Some(3));
        assert_eq!(content.count(MetadataKey::Words), Some(5));
    }

    #[test]
    fn test_assemble_skips_empty_pages_but_counts_them() {
        let content = assemble_pages(vec![
            "cover".to_string(),
            String::new(),
            "  \n ".to_string(),
            "body text".to_string(),
        ]);
        assert_eq!(content.text(), "cover\nbody text");
        assert_eq!(content.count(MetadataKey::Pages), Some(4));
        assert_eq!(content.count(MetadataKey::Characters), Some(15));
    }

    #[test]
    fn test_assemble_strips_page_padding() {
        let content = assemble_pages(vec![
            "\n\nFirst line.\n\nSecond line.\n".to_string(),
            "\n\n  indented\n".to_string(),
        ]);
        assert_eq!(content.text(), "First line.\n\nSecond line.\n  indented");
        assert_eq!(content.count(MetadataKey::Characters), Some(36));
    }

    #[test]
    fn test_assemble_no_pages() {
        let content = assemble_pages(Vec::new());
        assert_eq!(content.text(), "");
        assert_eq!(content.count(MetadataKey::Pages), Some(0));
        assert_eq!(content.count(MetadataKey::Words), Some(0));
    }

    #[test]
    fn test_blank_page_in_real_pdf() {
        let bytes = render_pdf(&[
            vec!["Alpha chapter opens here."],
            vec![],
            vec!["Gamma chapter closes here."],
        ])
        .unwrap();

        let content = extract_pdf(&bytes).unwrap();
        assert_eq!(content.count(MetadataKey::Pages), Some(3));

        let text = content.text();
        let alpha = text.find("Alpha").expect("first page text");
        let gamma = text.find("Gamma").expect("last page text");
        assert!(alpha < gamma);
    }
}
