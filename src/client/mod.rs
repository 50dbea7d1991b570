// file: src/client/mod.rs
// description: backend http client module exports
// reference: internal module structure

pub mod backend;

pub use backend::{ApiResponse, BackendClient};
