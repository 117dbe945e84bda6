//! The render-ready conversation entity.

use crate::model::{ConversationId, Message};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A conversation adapted from a backend record.
///
/// Immutable once built; owned by whichever caller requested it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    id: ConversationId,
    name: String,
    start_time: DateTime<Utc>,
    modified_time: DateTime<Utc>,
    messages: Vec<Message>,
}

impl Conversation {
    /// Assemble a conversation from already-validated parts.
    pub fn new(
        id: ConversationId,
        name: impl Into<String>,
        start_time: DateTime<Utc>,
        modified_time: DateTime<Utc>,
        messages: Vec<Message>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start_time,
            modified_time,
            messages,
        }
    }

    /// Plain conversation id.
    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// When the conversation was created.
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Last modification; drives history grouping.
    pub fn modified_time(&self) -> DateTime<Utc> {
        self.modified_time
    }

    /// Rendered turns in conversation order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
