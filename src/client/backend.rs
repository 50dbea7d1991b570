// file: src/client/backend.rs
// description: async client for the Harbor RAG backend http api
// reference: https://docs.rs/reqwest

use crate::config::BackendConfig;
use crate::error::{OpsError, Result};
use crate::models::{ChatRequest, DocumentsResponse, IndexRequest};
use crate::utils::Validator;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, warn};

pub const HEALTH_PATH: &str = "/health";
pub const STATS_PATH: &str = "/api/stats";
pub const DISCOVER_PATH: &str = "/api/discover";
pub const DOCUMENTS_PATH: &str = "/api/documents";
pub const INDEX_PATH: &str = "/api/index";
pub const CHAT_PATH: &str = "/api/chat";
pub const QUESTIONS_PATH: &str = "/api/generate-questions";

/// Status and raw body of a backend reply. Bodies are kept as text so the
/// caller can print them whether or not they parse as JSON.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub endpoint: String,
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Validator::validate_url(&config.base_url)?;

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| OpsError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        Validator::join_url(&self.base_url, path)
    }

    /// Liveness probe. Any connection error or non-2xx status means the
    /// backend is treated as not running.
    pub async fn health(&self) -> Result<ApiResponse> {
        let url = self.url(HEALTH_PATH);
        debug!("Probing backend health at {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            OpsError::BackendUnavailable {
                url: self.base_url.clone(),
                reason: e.to_string(),
            }
        })?;

        let reply = Self::read(HEALTH_PATH, response).await?;
        if !reply.is_success() {
            return Err(OpsError::BackendUnavailable {
                url: self.base_url.clone(),
                reason: format!("health check returned HTTP {}", reply.status),
            });
        }

        Ok(reply)
    }

    pub async fn stats(&self) -> Result<ApiResponse> {
        self.get(STATS_PATH, &[]).await
    }

    pub async fn discover(&self, base_url: Option<&str>) -> Result<ApiResponse> {
        let query: Vec<(&str, String)> = base_url
            .map(|url| vec![("base_url", url.to_string())])
            .unwrap_or_default();
        self.get(DISCOVER_PATH, &query).await
    }

    /// Fetches one page of stored documents. The body is decoded regardless
    /// of status; a missing `success` flag counts as a failure.
    pub async fn documents(&self, limit: usize, offset: Option<usize>) -> Result<DocumentsResponse> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }

        let reply = self.get(DOCUMENTS_PATH, &query).await?;
        match serde_json::from_str::<DocumentsResponse>(&reply.body) {
            Ok(documents) => Ok(documents),
            Err(e) if !reply.is_success() => {
                debug!("Undecodable error body from {}: {}", DOCUMENTS_PATH, e);
                Ok(DocumentsResponse {
                    message: Some(format!("HTTP {}: {}", reply.status, reply.body.trim())),
                    ..DocumentsResponse::default()
                })
            }
            Err(e) => Err(OpsError::Serialization(e)),
        }
    }

    pub async fn index(&self, base_url: &str) -> Result<ApiResponse> {
        let request = IndexRequest::new(base_url);
        self.post(INDEX_PATH, Some(serde_json::to_value(&request)?))
            .await
    }

    pub async fn chat(&self, question: &str) -> Result<ApiResponse> {
        Validator::validate_question(question)?;
        let request = ChatRequest::new(question);
        self.post(CHAT_PATH, Some(serde_json::to_value(&request)?))
            .await
    }

    pub async fn generate_questions(&self) -> Result<ApiResponse> {
        self.post(QUESTIONS_PATH, None).await
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| OpsError::Request {
                endpoint: path.to_string(),
                source: e,
            })?;

        Self::read(path, response).await
    }

    async fn post(&self, path: &str, body: Option<serde_json::Value>) -> Result<ApiResponse> {
        let url = self.url(path);
        debug!("POST {}", url);

        let mut request = self.client.post(&url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| OpsError::Request {
            endpoint: path.to_string(),
            source: e,
        })?;

        Self::read(path, response).await
    }

    async fn read(path: &str, response: Response) -> Result<ApiResponse> {
        let status = response.status();
        let body = response.text().await.map_err(|e| OpsError::Request {
            endpoint: path.to_string(),
            source: e,
        })?;

        if !status.is_success() {
            warn!("{} returned HTTP {}", path, status.as_u16());
        }

        Ok(ApiResponse {
            endpoint: path.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}
