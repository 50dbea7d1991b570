// file: src/workflow/inspector.rs
// description: read-only tour of what the backend has indexed

use crate::client::BackendClient;
use crate::error::Result;
use crate::report::{DocumentReport, write_pretty};
use crate::utils::logging::format_step;
use crate::workflow::gate::require_backend;
use std::io::Write;
use tracing::info;

const STEPS: usize = 4;

#[derive(Debug, Clone)]
pub struct InspectOptions {
    pub limit: usize,
    pub offset: Option<usize>,
    pub preview_lines: usize,
    pub discover_base_url: Option<String>,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: None,
            preview_lines: 20,
            discover_base_url: None,
        }
    }
}

/// Returns the number of documents reported.
pub async fn run_inspection<W: Write>(
    client: &BackendClient,
    options: &InspectOptions,
    out: &mut W,
) -> Result<usize> {
    writeln!(out, "{}", format_step(1, STEPS, "Checking backend"))?;
    require_backend(client, out).await?;

    writeln!(out, "{}", format_step(2, STEPS, "Index statistics"))?;
    let stats = client.stats().await?;
    write_pretty(out, &stats)?;

    writeln!(out, "{}", format_step(3, STEPS, "Discovered URLs"))?;
    let discovered = client
        .discover(options.discover_base_url.as_deref())
        .await?;
    write_pretty(out, &discovered)?;

    writeln!(
        out,
        "{}",
        format_step(4, STEPS, &format!("Documents (limit {})", options.limit))
    )?;
    let documents = client.documents(options.limit, options.offset).await?;
    let shown = DocumentReport::new(options.preview_lines).render(&documents, out)?;

    info!(
        "Inspection complete at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(shown)
}
