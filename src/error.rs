// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OpsError>;

#[derive(Error, Debug)]
pub enum OpsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Backend is not running at {url}: {reason}")]
    BackendUnavailable { url: String, reason: String },

    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("API reported failure: {0}")]
    Api(String),

    #[error("Created {path}; set OPENAI_API_KEY there and run again")]
    ConfigScaffolded { path: PathBuf },

    #[error("OPENAI_API_KEY is not set in {path}")]
    MissingSecret { path: PathBuf },

    #[error("OPENAI_API_KEY in {path} still holds the placeholder value")]
    PlaceholderSecret { path: PathBuf },

    #[error("Port {0} is already in use")]
    PortInUse(u16),

    #[error("Command `{program}` failed: {detail}")]
    Command { program: String, detail: String },

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Progress display error: {0}")]
    Progress(#[from] indicatif::style::TemplateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
