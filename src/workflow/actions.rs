// file: src/workflow/actions.rs
// description: single-endpoint commands, each behind the liveness gate

use crate::client::BackendClient;
use crate::error::Result;
use crate::report::{DocumentReport, write_pretty};
use crate::workflow::gate::require_backend;
use std::io::Write;

#[derive(Debug, Clone)]
pub enum Action {
    Health,
    Stats,
    Discover {
        base_url: Option<String>,
    },
    Documents {
        limit: usize,
        offset: Option<usize>,
        preview_lines: usize,
    },
    Chat {
        question: String,
    },
    Questions,
}

pub async fn run_action<W: Write>(client: &BackendClient, action: &Action, out: &mut W) -> Result<()> {
    let health = require_backend(client, out).await?;

    let reply = match action {
        Action::Health => health,
        Action::Stats => client.stats().await?,
        Action::Discover { base_url } => client.discover(base_url.as_deref()).await?,
        Action::Documents {
            limit,
            offset,
            preview_lines,
        } => {
            let documents = client.documents(*limit, *offset).await?;
            DocumentReport::new(*preview_lines).render(&documents, out)?;
            return Ok(());
        }
        Action::Chat { question } => client.chat(question).await?,
        Action::Questions => client.generate_questions().await?,
    };

    write_pretty(out, &reply)?;
    Ok(())
}
