use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

/// The closed set of formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Text,
    Word,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 3] = [Self::Pdf, Self::Text, Self::Word];

    /// Resolve the format from a file name's extension, ignoring case.
    ///
    /// The content is never sniffed: `report.txt` holding PDF bytes is still
    /// treated as text.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| Error::UnsupportedFormat(file_name.to_string()))?;

        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "txt" => Ok(Self::Text),
            "docx" => Ok(Self::Word),
            _ => Err(Error::UnsupportedFormat(format!(".{ext}"))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Text => "txt",
            Self::Word => "docx",
        }
    }

    /// Value shown for the report's "Type" row.
    pub fn type_label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Text => "Text File",
            Self::Word => "Word File",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_label())
    }
}

/// Raw upload as received from the file picker.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    file_name: String,
    format: DocumentFormat,
    bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let format = DocumentFormat::from_file_name(&file_name)?;
        Ok(Self {
            file_name,
            format,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetadataKey {
    Type,
    Pages,
    Paragraphs,
    Characters,
    Words,
}

impl MetadataKey {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Type => "Type",
            Self::Pages => "Pages",
            Self::Paragraphs => "Paragraphs",
            Self::Characters => "Characters",
            Self::Words => "Words",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Text(String),
    Count(usize),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

/// Plain text pulled out of an upload, plus the statistics that describe it.
///
/// Only the extractor builds these, through [`ExtractedContent::new`], so the
/// character and word counts always describe `text` exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedContent {
    format: DocumentFormat,
    text: String,
    metadata: Vec<(MetadataKey, MetadataValue)>,
}

impl ExtractedContent {
    pub(crate) fn new(
        format: DocumentFormat,
        text: String,
        structure: Option<(MetadataKey, usize)>,
    ) -> Self {
        let mut metadata = vec![(
            MetadataKey::Type,
            MetadataValue::Text(format.type_label().to_string()),
        )];
        if let Some((key, count)) = structure {
            metadata.push((key, MetadataValue::Count(count)));
        }
        metadata.push((MetadataKey::Characters, MetadataValue::Count(count_chars(&text))));
        metadata.push((MetadataKey::Words, MetadataValue::Count(count_words(&text))));

        Self {
            format,
            text,
            metadata,
        }
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Metadata in insertion order: type, structural count, characters, words.
    pub fn metadata(&self) -> &[(MetadataKey, MetadataValue)] {
        &self.metadata
    }

    pub fn get(&self, key: MetadataKey) -> Option<&MetadataValue> {
        self.metadata
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn count(&self, key: MetadataKey) -> Option<usize> {
        match self.get(key)? {
            MetadataValue::Count(n) => Some(*n),
            MetadataValue::Text(_) => None,
        }
    }
}

/// Length in characters (Unicode scalar values), not bytes.
pub fn count_chars(text: &str) -> usize {
    text.chars().count()
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_file_name("a.pdf").unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_file_name("notes.TXT").unwrap(), DocumentFormat::Text);
        assert_eq!(
            DocumentFormat::from_file_name("dir.v2/report.Docx").unwrap(),
            DocumentFormat::Word
        );
    }

    #[test]
    fn test_unsupported_extensions() {
        for name in ["notes.rtf", "archive.doc", "README", "trailing."] {
            let err = DocumentFormat::from_file_name(name).unwrap_err();
            assert!(matches!(err, Error::UnsupportedFormat(_)), "{name}");
        }
    }

    #[test]
    fn test_counts_use_characters_not_bytes() {
        assert_eq!(count_chars("café"), 4);
        assert_eq!(count_words("  one\ttwo\nthree  "), 3);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words(" \n\t "), 0);
    }

    #[test]
    fn test_metadata_order() {
        let content = ExtractedContent::new(
            DocumentFormat::Word,
            "a b".to_string(),
            Some((MetadataKey::Paragraphs, 4)),
        );
        let keys: Vec<_> = content.metadata().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                MetadataKey::Type,
                MetadataKey::Paragraphs,
                MetadataKey::Characters,
                MetadataKey::Words
            ]
        );
        assert_eq!(content.count(MetadataKey::Characters), Some(3));
        assert_eq!(content.count(MetadataKey::Words), Some(2));
        assert_eq!(content.count(MetadataKey::Type), None);
        assert_eq!(
            content.get(MetadataKey::Type),
            Some(&MetadataValue::Text("Word File".to_string()))
        );
    }

    #[test]
    fn test_uploaded_document_rejects_unknown_type() {
        assert!(UploadedDocument::new("notes.rtf", b"{\\rtf1}".to_vec()).is_err());
        let doc = UploadedDocument::new("notes.txt", b"hi".to_vec()).unwrap();
        assert_eq!(doc.format(), DocumentFormat::Text);
        assert_eq!(doc.bytes(), b"hi");
    }
}
