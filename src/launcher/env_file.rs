// file: src/launcher/env_file.rs
// description: the backend's .env file: scaffolding, parsing and secret checks
// reference: https://docs.rs/dotenvy

use crate::error::{OpsError, Result};
use crate::utils::Validator;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const API_KEY: &str = "OPENAI_API_KEY";
pub const FRONTEND_URL: &str = "FRONTEND_URL";
pub const BACKEND_PORT: &str = "BACKEND_PORT";
pub const CHROMA_PERSIST_DIRECTORY: &str = "CHROMA_PERSIST_DIRECTORY";

/// Written into a fresh file; a key still holding it counts as unconfigured.
pub const PLACEHOLDER_SECRET: &str = "your_openai_api_key_here";

/// Parsed key/value pairs of the backend's `.env`. The file is never
/// loaded into this process's environment.
#[derive(Debug, Clone)]
pub struct BackendEnv {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl BackendEnv {
    pub fn template() -> String {
        format!(
            "# Harbor RAG backend configuration\n\
             {API_KEY}={PLACEHOLDER_SECRET}\n\
             {FRONTEND_URL}=http://localhost:3000\n\
             {BACKEND_PORT}=8000\n\
             {CHROMA_PERSIST_DIRECTORY}=./chroma_db\n"
        )
    }

    pub fn scaffold(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| OpsError::FileOperation {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, Self::template()).map_err(|e| OpsError::FileOperation {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!("Wrote configuration template to {}", path.display());
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self> {
        let iter = dotenvy::from_path_iter(path)
            .map_err(|e| OpsError::Config(format!("{}: {}", path.display(), e)))?;

        let mut values = HashMap::new();
        for item in iter {
            let (key, value) =
                item.map_err(|e| OpsError::Config(format!("{}: {}", path.display(), e)))?;
            values.insert(key, value);
        }

        debug!("Read {} keys from {}", values.len(), path.display());
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The API key, provided it is set and no longer the template value.
    pub fn require_secret(&self) -> Result<&str> {
        match self.get(API_KEY).map(str::trim) {
            None | Some("") => Err(OpsError::MissingSecret {
                path: self.path.clone(),
            }),
            Some(PLACEHOLDER_SECRET) => Err(OpsError::PlaceholderSecret {
                path: self.path.clone(),
            }),
            Some(secret) => Ok(secret),
        }
    }

    pub fn port(&self, default: u16) -> Result<u16> {
        match self.get(BACKEND_PORT) {
            Some(value) if !value.trim().is_empty() => Validator::parse_port(value)
                .map_err(|e| OpsError::Config(format!("{} in {}: {}", BACKEND_PORT, self.path.display(), e))),
            _ => Ok(default),
        }
    }
}
