//! `headspace respond` - forward text to an agent through the retry layer.

use anyhow::Result;
use colored::Colorize;
use headspace_client::pending::PendingDraftStore;
use headspace_client::retry::StatusSink;
use headspace_client::transport::ReqwestTransport;
use headspace_client::{ActionOutcome, AgentActionClient, ConfigService};

/// Reports retry progress and the terminal outcome on the terminal.
struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn retrying(&self, attempt: u32, max_retries: u32) {
        println!("{}", format!("Retrying... ({attempt}/{max_retries})").yellow());
    }

    fn acknowledged(&self, resource_id: &str) {
        println!("{}", format!("Sent to agent {resource_id}").green());
    }

    fn failed(&self, message: &str) {
        eprintln!("{}", message.red());
    }
}

/// Returns true on success; on failure the draft is kept for recovery.
pub async fn run(agent_id: &str, text: &str) -> Result<bool> {
    let config = ConfigService::new().get_config();
    let transport = ReqwestTransport::from_config(&config);
    let pending = PendingDraftStore::new()?;

    let client = AgentActionClient::new(transport, config.retry.clone(), pending)
        .with_status_sink(Box::new(ConsoleSink));

    match client.respond(agent_id, text).await {
        ActionOutcome::Success => Ok(true),
        ActionOutcome::Failed { .. } => {
            eprintln!(
                "{}",
                format!("Draft saved; recover it from the pending drafts for agent {agent_id}.")
                    .yellow()
            );
            Ok(false)
        }
    }
}
