// file: src/models/request.rs
// description: JSON request bodies sent to the backend
// reference: POST /api/index and POST /api/chat

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct IndexRequest {
    pub base_url: String,
}

impl IndexRequest {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub question: String,
}

impl ChatRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}
