// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{OpsError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/harbor.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub indexing: IndexingConfig,
    pub inspect: InspectConfig,
    pub launcher: LauncherConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// Site the backend is asked to crawl and index.
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InspectConfig {
    pub document_limit: usize,
    pub preview_lines: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LauncherConfig {
    pub backend_dir: PathBuf,
    pub env_file: PathBuf,
    pub venv_dir: PathBuf,
    pub requirements: PathBuf,
    pub log_dir: PathBuf,
    pub entrypoint: PathBuf,
    pub python: String,
    pub default_port: u16,
}

impl LauncherConfig {
    /// Resolves a launcher path against `backend_dir` unless it is absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.backend_dir.join(path)
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| OpsError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);

        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        builder = builder.add_source(config::File::from(file).required(path.is_some()));

        builder = builder.add_source(
            config::Environment::with_prefix("HARBOR")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| OpsError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| OpsError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            backend: BackendConfig {
                base_url: "http://localhost:8000".to_string(),
                request_timeout_secs: None,
            },
            indexing: IndexingConfig {
                base_url: "http://localhost:3000".to_string(),
            },
            inspect: InspectConfig {
                document_limit: 10,
                preview_lines: 20,
            },
            launcher: LauncherConfig {
                backend_dir: PathBuf::from("backend"),
                env_file: PathBuf::from(".env"),
                venv_dir: PathBuf::from("venv"),
                requirements: PathBuf::from("requirements.txt"),
                log_dir: PathBuf::from("logs"),
                entrypoint: PathBuf::from("run.py"),
                python: "python3".to_string(),
                default_port: 8000,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.backend.base_url)
            .map_err(|e| OpsError::Config(format!("backend.base_url: {}", e)))?;

        Validator::validate_url(&self.indexing.base_url)
            .map_err(|e| OpsError::Config(format!("indexing.base_url: {}", e)))?;

        if self.backend.request_timeout_secs == Some(0) {
            return Err(OpsError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.inspect.document_limit == 0 {
            return Err(OpsError::Config(
                "document_limit must be greater than 0".to_string(),
            ));
        }

        if self.inspect.preview_lines == 0 {
            return Err(OpsError::Config(
                "preview_lines must be greater than 0".to_string(),
            ));
        }

        Validator::validate_port(self.launcher.default_port)
            .map_err(|e| OpsError::Config(format!("launcher.default_port: {}", e)))?;

        Ok(())
    }
}
