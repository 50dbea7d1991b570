// file: src/workflow/gate.rs
// description: liveness gate that precedes every backend request

use crate::client::{ApiResponse, BackendClient};
use crate::error::Result;
use crate::utils::logging::format_success;
use std::io::Write;
use tracing::{debug, error};

/// Probes `/health` and stops the caller on failure. Nothing else may be
/// sent to the backend before this returns `Ok`.
pub async fn require_backend<W: Write>(client: &BackendClient, out: &mut W) -> Result<ApiResponse> {
    match client.health().await {
        Ok(reply) => {
            debug!("Health reply: {}", reply.body.trim());
            writeln!(
                out,
                "{}",
                format_success(&format!("Backend is running at {}", client.base_url()))
            )?;
            Ok(reply)
        }
        Err(e) => {
            error!("Liveness check failed: {}", e);
            Err(e)
        }
    }
}
