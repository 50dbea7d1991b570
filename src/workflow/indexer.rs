// file: src/workflow/indexer.rs
// description: trigger a site crawl on the backend and show stats before and after
// reference: POST /api/index

use crate::client::BackendClient;
use crate::error::Result;
use crate::report::write_pretty;
use crate::utils::logging::{format_step, format_warning};
use crate::workflow::gate::require_backend;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::info;

const STEPS: usize = 4;

pub async fn run_indexing<W: Write>(
    client: &BackendClient,
    base_url: &str,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", format_step(1, STEPS, "Checking backend"))?;
    require_backend(client, out).await?;

    writeln!(out, "{}", format_step(2, STEPS, "Current index statistics"))?;
    let before = client.stats().await?;
    write_pretty(out, &before)?;

    writeln!(
        out,
        "{}",
        format_step(3, STEPS, &format!("Indexing {}", base_url))
    )?;
    info!("Requesting indexing of {}", base_url);

    let spinner = create_spinner(base_url)?;
    let started = Instant::now();
    let result = client.index(base_url).await;
    spinner.finish_and_clear();
    let result = result?;

    info!(
        "Index request finished in {:.2}s (HTTP {})",
        started.elapsed().as_secs_f64(),
        result.status
    );
    if !result.is_success() {
        writeln!(
            out,
            "{}",
            format_warning(&format!(
                "{} returned HTTP {}",
                result.endpoint, result.status
            ))
        )?;
    }
    write_pretty(out, &result)?;

    writeln!(out, "{}", format_step(4, STEPS, "Index statistics after indexing"))?;
    let after = client.stats().await?;
    write_pretty(out, &after)?;

    Ok(())
}

fn create_spinner(base_url: &str) -> Result<ProgressBar> {
    let style =
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(style);
    spinner.set_message(format!("Indexing {}", base_url));
    spinner.enable_steady_tick(Duration::from_millis(120));
    Ok(spinner)
}
