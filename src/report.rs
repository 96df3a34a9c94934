use serde::{Deserialize, Serialize};

use crate::document::ExtractedContent;

/// One labelled row of the document report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportField {
    pub label: String,
    pub value: String,
}

/// Turn extraction metadata into display rows, keeping extraction order.
pub fn build_report(content: &ExtractedContent) -> Vec<ReportField> {
    content
        .metadata()
        .iter()
        .map(|(key, value)| ReportField {
            label: key.label().to_string(),
            value: value.to_string(),
        })
        .collect()
}
