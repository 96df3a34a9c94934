use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::document::{DocumentFormat, UploadedDocument};
use crate::extractor::{extract, preview, PREVIEW_CHARS};
use crate::report::{build_report, ReportField};
use crate::error::{Error, Result};

/// Everything the page shows after an upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionView {
    pub file_name: String,
    pub preview: String,
    pub report: Vec<ReportField>,
    /// Full text, handed back to `summarize` when the user asks for it.
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerInfo {
    pub model: String,
    pub tls_verification: bool,
}

/// Upload → extraction → report, as one pass.
pub fn process_upload(file_name: &str, bytes: Vec<u8>) -> Result<ExtractionView> {
    let doc = UploadedDocument::new(file_name, bytes)?;
    let content = extract(&doc)?;
    let report = build_report(&content);
    let preview = preview(content.text(), PREVIEW_CHARS).to_string();

    Ok(ExtractionView {
        file_name: doc.file_name().to_string(),
        preview,
        report,
        text: content.into_text(),
    })
}

/// Read a picked file from disk and run it through [`process_upload`].
///
/// The format still comes from the file name, not the contents.
pub fn process_path(path: &Path) -> Result<ExtractionView> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;
    // Reject before reading so an unsupported file is never loaded
    DocumentFormat::from_file_name(file_name)?;

    let bytes = std::fs::read(path)?;
    process_upload(file_name, bytes)
}
