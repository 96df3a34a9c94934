use crate::document::{DocumentFormat, ExtractedContent};
use crate::error::{Error, Result};

/// Decode an uploaded text file verbatim.
///
/// Invalid UTF-8 is rejected rather than patched with replacement
/// characters, so the reported counts always describe what the user wrote.
pub fn extract_text(bytes: &[u8]) -> Result<ExtractedContent> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::decode(DocumentFormat::Text, e.to_string()))?;

    Ok(ExtractedContent::new(DocumentFormat::Text, text.to_string(), None))
}
