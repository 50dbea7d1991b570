// file: src/models/document.rs
// description: document list payload returned by the backend's documents endpoint
// reference: GET /api/documents response body

use serde::{Deserialize, Serialize};

/// A stored document as listed by the backend. Fields other than the ones
/// shown in reports (`text_snippet`, `metadata`) are ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentInfo {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub source_url: String,

    #[serde(default)]
    pub full_text: String,
}

impl DocumentInfo {
    /// Content length in characters, not bytes.
    pub fn content_length(&self) -> usize {
        self.full_text.chars().count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DocumentsResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub documents: Vec<DocumentInfo>,

    #[serde(default)]
    pub total_count: u64,

    #[serde(default)]
    pub message: Option<String>,

    /// FastAPI puts exception text here on 5xx responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl DocumentsResponse {
    pub fn failure_message(&self) -> String {
        self.message
            .as_deref()
            .or(self.detail.as_deref())
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("Unknown error")
            .to_string()
    }
}
