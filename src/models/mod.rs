// file: src/models/mod.rs
// description: api payload models module exports
// reference: internal module structure

pub mod document;
pub mod request;

pub use document::{DocumentInfo, DocumentsResponse};
pub use request::{ChatRequest, IndexRequest};
