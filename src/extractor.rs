use std::time::Instant;
use tracing::{debug, info};

use crate::docx_parser::extract_docx;
use crate::document::{DocumentFormat, ExtractedContent, MetadataKey, UploadedDocument};
use crate::error::Result;
use crate::pdf_parser::extract_pdf;
use crate::text_parser::extract_text;

pub const PREVIEW_CHARS: usize = 1000;

/// Run the strategy matching the upload's format.
pub fn extract(doc: &UploadedDocument) -> Result<ExtractedContent> {
    let start = Instant::now();
    debug!(file = doc.file_name(), bytes = doc.bytes().len(), "Extracting document");

    let content = match doc.format() {
        DocumentFormat::Pdf => extract_pdf(doc.bytes())?,
        DocumentFormat::Text => extract_text(doc.bytes())?,
        DocumentFormat::Word => extract_docx(doc.bytes())?,
    };

    info!(
        file = doc.file_name(),
        format = %doc.format(),
        characters = content.count(MetadataKey::Characters).unwrap_or(0),
        words = content.count(MetadataKey::Words).unwrap_or(0),
        elapsed = ?start.elapsed(),
        "Extracted document"
    );

    Ok(content)
}

/// First `max_chars` characters of `text`, never splitting a character.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
