//! Backend boundary.
//!
//! The store that owns conversations is reached through
//! [`ConversationBackend`]; this crate only consumes its raw records.
//! [`ConversationService`] composes backend calls with the adapter and the
//! grouper. Calls are made once, in order, and never retried: a failure is
//! surfaced as [`ConversationError::RpcFailure`].

pub mod snapshot;

pub use snapshot::{Snapshot, SnapshotBackend};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adapter::ConversationAdapter;
use crate::grouping::{group, GroupedConversations, TimeWindow};
use crate::model::{BackendError, Conversation, ConversationError, RawConversation};

/// A model the backend can serve.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelInfo {
    /// Inference engine name.
    pub engine: String,
    /// Model name within the engine.
    pub name: String,
}

/// A [`ModelInfo`] with a positional id, for pickers that key by string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedModel {
    /// Position in the backend's list, as a string.
    pub id: String,
    /// Inference engine name.
    pub engine: String,
    /// Model name within the engine.
    pub name: String,
}

/// Operations the conversation store exposes.
pub trait ConversationBackend {
    /// Full record, messages included.
    fn find_conversation(&self, id: &str) -> Result<RawConversation, BackendError>;

    /// Records ordered by `modified_time`, most recent first.
    ///
    /// Records may be lean (no messages).
    fn conversations_date_sorted(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<RawConversation>, BackendError>;

    /// Models available for chatting.
    fn list_models(&self) -> Result<Vec<ModelInfo>, BackendError>;

    /// Whether the inference side is reachable.
    fn check_connection(&self) -> Result<bool, BackendError>;
}

/// Fetches records from a backend and adapts them.
pub struct ConversationService<B> {
    backend: B,
    adapter: ConversationAdapter,
}

impl<B: ConversationBackend> ConversationService<B> {
    /// Create a service over `backend`.
    pub fn new(backend: B, adapter: ConversationAdapter) -> Self {
        Self { backend, adapter }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Look up one conversation. No id means nothing is selected: `Ok(None)`
    /// without calling the backend.
    pub fn find(&self, id: Option<&str>) -> Result<Option<Conversation>, ConversationError> {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            return Ok(None);
        };
        debug!(id, "find_conversation");
        let raw = self.backend.find_conversation(id)?;
        self.adapter.adapt(raw).map(Some)
    }

    /// A page of conversations, most recent first.
    pub fn recent(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Conversation>, ConversationError> {
        let raws = self.backend.conversations_date_sorted(limit, offset)?;
        info!(limit, offset, count = raws.len(), "Fetched conversation page");
        self.adapter.adapt_list(raws)
    }

    /// A page of conversations grouped into `windows`.
    pub fn recent_grouped(
        &self,
        limit: usize,
        offset: usize,
        windows: &[TimeWindow],
    ) -> Result<GroupedConversations, ConversationError> {
        Ok(group(self.recent(limit, offset)?, windows))
    }

    /// Models as the backend lists them.
    pub fn models(&self) -> Result<Vec<ModelInfo>, ConversationError> {
        Ok(self.backend.list_models()?)
    }

    /// Models tagged with their list position.
    pub fn indexed_models(&self) -> Result<Vec<IndexedModel>, ConversationError> {
        Ok(self
            .models()?
            .into_iter()
            .enumerate()
            .map(|(i, model)| IndexedModel {
                id: i.to_string(),
                engine: model.engine,
                name: model.name,
            })
            .collect())
    }

    /// Whether the backend reports itself alive.
    pub fn is_alive(&self) -> Result<bool, ConversationError> {
        Ok(self.backend.check_connection()?)
    }
}

/// Sort key used by backends that order by modification time.
///
/// Unparsable times sort after everything else.
pub(crate) fn modified_sort_key(raw: &RawConversation) -> Option<DateTime<Utc>> {
    crate::adapter::parse_instant(&raw.modified_time, "modified_time").ok()
}
