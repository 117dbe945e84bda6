//! In-memory backend over a JSON snapshot document.
//!
//! ```json
//! {
//!   "alive": true,
//!   "models": [{"engine": "llama", "name": "small"}],
//!   "conversations": [ RawConversation, ... ]
//! }
//! ```
//!
//! Every field is optional. Lets the CLI and tests exercise the full
//! backend → adapter → grouper path without a running store.

use serde::Deserialize;

use super::{modified_sort_key, ConversationBackend, ModelInfo};
use crate::model::{BackendError, RawConversation};

/// Parsed snapshot document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Snapshot {
    /// Reported by `check_connection`.
    #[serde(default = "default_alive")]
    pub alive: bool,
    /// Reported by `list_models`.
    #[serde(default)]
    pub models: Vec<ModelInfo>,
    /// Stored conversations, any order.
    #[serde(default)]
    pub conversations: Vec<RawConversation>,
}

fn default_alive() -> bool {
    true
}

/// Serves a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotBackend {
    snapshot: Snapshot,
}

impl SnapshotBackend {
    /// Wrap an already-parsed snapshot.
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Parse a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// [`BackendError::Decode`] if the text is not a snapshot document.
    pub fn from_json(json: &str) -> Result<Self, BackendError> {
        serde_json::from_str(json)
            .map(Self::new)
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}

impl ConversationBackend for SnapshotBackend {
    fn find_conversation(&self, id: &str) -> Result<RawConversation, BackendError> {
        self.snapshot
            .conversations
            .iter()
            .find(|raw| raw.record_key() == Some(id))
            .cloned()
            .ok_or_else(|| BackendError::NotFound(id.to_string()))
    }

    fn conversations_date_sorted(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<RawConversation>, BackendError> {
        let mut sorted: Vec<&RawConversation> = self.snapshot.conversations.iter().collect();
        // Stable: equal times keep snapshot order. `None` sorts last.
        sorted.sort_by(|a, b| modified_sort_key(b).cmp(&modified_sort_key(a)));

        Ok(sorted
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn list_models(&self) -> Result<Vec<ModelInfo>, BackendError> {
        Ok(self.snapshot.models.clone())
    }

    fn check_connection(&self) -> Result<bool, BackendError> {
        Ok(self.snapshot.alive)
    }
}
