//! Records as received from the backend boundary.
//!
//! These mirror the backend's JSON shape exactly and are discarded once
//! adapted. Field-level validation (id wrapper, timestamps) happens in
//! [`crate::adapter`], not during deserialization, so that failures surface as
//! typed [`ConversationError`](crate::model::ConversationError)s.

use serde::{Deserialize, Serialize};

/// Conversation record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawConversation {
    /// Wrapped record id, e.g. `{"tb": "conversation", "id": {"String": "abc"}}`.
    pub id: serde_json::Value,
    /// Display name.
    pub name: String,
    /// Creation time, unparsed.
    pub start_time: String,
    /// Last modification time, unparsed.
    pub modified_time: String,
    /// Turns; absent on lean listing records.
    #[serde(default)]
    pub messages: Vec<RawMessage>,
}

impl RawConversation {
    /// The plain key inside the id wrapper, if the wrapper has the expected shape.
    pub fn record_key(&self) -> Option<&str> {
        self.id
            .get("id")
            .and_then(|inner| inner.get("String"))
            .and_then(serde_json::Value::as_str)
    }
}

/// One turn as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawMessage {
    /// When the turn was recorded, unparsed.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// "user", "assistant", or anything else.
    pub role: String,
    /// Markdown body.
    pub content: String,
}
