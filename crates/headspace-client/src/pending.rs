//! Recovery store for unsent respond drafts.
//!
//! When a respond action fails and the originating input may be gone (the
//! panel is rebuilt wholesale on every refresh), the attempted text is
//! persisted here keyed by agent id so the operator can recover it later.

use std::collections::HashMap;
use std::path::PathBuf;

use headspace_core::HeadspaceError;
use tracing::warn;

use crate::paths::HeadspacePaths;

/// JSON-file-backed map of `agent_id -> draft text`.
pub struct PendingDraftStore {
    path: PathBuf,
}

impl PendingDraftStore {
    /// Creates a store at the default location under the headspace config dir.
    pub fn new() -> Result<Self, HeadspaceError> {
        Ok(Self {
            path: HeadspacePaths::pending_file()?,
        })
    }

    /// Creates a store backed by an explicit file path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Saves `text` as the pending draft for `agent_id`, replacing any
    /// previous draft for the same agent.
    pub async fn stash(&self, agent_id: &str, text: &str) -> Result<(), HeadspaceError> {
        let mut drafts = self.load().await;
        drafts.insert(agent_id.to_string(), text.to_string());
        self.save(&drafts).await
    }

    /// Returns the pending draft for `agent_id` without removing it.
    pub async fn peek(&self, agent_id: &str) -> Option<String> {
        self.load().await.get(agent_id).cloned()
    }

    /// Removes and returns the pending draft for `agent_id`.
    pub async fn take(&self, agent_id: &str) -> Option<String> {
        let mut drafts = self.load().await;
        let draft = drafts.remove(agent_id)?;
        if let Err(err) = self.save(&drafts).await {
            warn!(agent_id, %err, "failed to persist draft removal");
        }
        Some(draft)
    }

    async fn load(&self) -> HashMap<String, String> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(_) => return HashMap::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(drafts) => drafts,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "pending drafts file is corrupt, starting fresh");
                HashMap::new()
            }
        }
    }

    async fn save(&self, drafts: &HashMap<String, String>) -> Result<(), HeadspaceError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_string_pretty(drafts)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}
