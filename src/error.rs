use serde::{Serialize, Serializer};

use crate::document::DocumentFormat;

/// Everything a single interaction can fail with.
///
/// Commands return `Result<T, Error>`; the webview receives the display
/// string and shows it next to the control that triggered the call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Could not read {format} content: {message}")]
    Decode {
        format: DocumentFormat,
        message: String,
    },

    #[error("Summarization failed: {0}")]
    ExternalService(String),

    #[error("The document has no text to summarize")]
    NothingToSummarize,

    #[error("Could not generate sample {0}: {1}")]
    SampleGeneration(DocumentFormat, String),

    #[error("Invalid configuration value for {key}: {message}")]
    Config { key: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn decode(format: DocumentFormat, message: impl Into<String>) -> Self {
        Error::Decode {
            format,
            message: message.into(),
        }
    }
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
