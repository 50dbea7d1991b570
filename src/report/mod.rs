// file: src/report/mod.rs
// description: terminal report rendering module exports
// reference: internal module structure

pub mod documents;
pub mod pretty;

pub use documents::{DocumentReport, Preview};
pub use pretty::{pretty_json, write_pretty};
