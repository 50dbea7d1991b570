// file: tests/common/mod.rs
// description: in-process fake of the Harbor backend api for cli tests

#![allow(dead_code)]

use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct BackendState {
    healthy: bool,
    documents: Value,
    hits: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<String>>>,
}

pub struct FakeBackend {
    pub port: u16,
    hits: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<String>>>,
}

impl FakeBackend {
    pub fn healthy(documents: Value) -> Self {
        Self::start(true, documents)
    }

    pub fn unhealthy() -> Self {
        Self::start(false, json!({}))
    }

    fn start(healthy: bool, documents: Value) -> Self {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let state = BackendState {
            healthy,
            documents,
            hits: Arc::clone(&hits),
            bodies: Arc::clone(&bodies),
        };

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                let app = Router::new().fallback(handle).with_state(state);
                axum::serve(listener, app).await.unwrap();
            });
        });

        Self { port, hits, bodies }
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }
}

async fn handle(
    State(state): State<BackendState>,
    method: Method,
    uri: Uri,
    body: String,
) -> (StatusCode, String) {
    state
        .hits
        .lock()
        .unwrap()
        .push(format!("{} {}", method, uri.path()));
    if !body.is_empty() {
        state.bodies.lock().unwrap().push(body);
    }

    let reply = match (method.as_str(), uri.path()) {
        ("GET", "/health") if !state.healthy => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({"detail": "RAG service not initialized"}).to_string(),
            );
        }
        ("GET", "/health") => json!({"status": "healthy", "rag_ready": true, "document_count": 2}),
        ("GET", "/api/stats") => json!({
            "success": true,
            "document_count": 2,
            "collection_name": "harbor_docs",
            "is_ready": true
        }),
        ("GET", "/api/discover") => json!({
            "success": true,
            "urls": ["http://localhost:3000/", "http://localhost:3000/news"],
            "total_count": 2
        }),
        ("GET", "/api/documents") => state.documents.clone(),
        ("POST", "/api/index") => json!({
            "success": true,
            "message": "Indexing started",
            "indexed_count": 0
        }),
        ("POST", "/api/chat") => json!({
            "success": true,
            "response": "Harbor is a news site.",
            "sources": [],
            "question": "What is Harbor?"
        }),
        _ => return (StatusCode::NOT_FOUND, json!({"detail": "Not Found"}).to_string()),
    };

    (StatusCode::OK, reply.to_string())
}

pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

pub fn lines(count: usize) -> String {
    (1..=count)
        .map(|i| format!("paragraph {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}
