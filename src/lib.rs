// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod client;
pub mod config;
pub mod error;
pub mod launcher;
pub mod models;
pub mod report;
pub mod utils;
pub mod workflow;

pub use client::{ApiResponse, BackendClient};
pub use config::{BackendConfig, Config, IndexingConfig, InspectConfig, LauncherConfig};
pub use error::{OpsError, Result};
pub use launcher::{BackendEnv, Provisioner, VenvProvisioner};
pub use models::{ChatRequest, DocumentInfo, DocumentsResponse, IndexRequest};
pub use report::{DocumentReport, Preview};
pub use utils::Validator;
pub use workflow::{Action, InspectOptions};
