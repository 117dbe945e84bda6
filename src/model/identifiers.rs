//! Identifier newtypes with smart constructors.

use serde::Serialize;
use std::fmt;

/// Plain identifier of a conversation, unwrapped from the backend record id.
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Smart constructor: validates a non-empty id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidConversationId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidConversationId::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for ConversationId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ConversationId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Rejection reasons for [`ConversationId::new`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvalidConversationId {
    /// The id was the empty string.
    #[error("Conversation ID cannot be empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        assert!(ConversationId::new("").is_err());
    }

    #[test]
    fn displays_raw_value() {
        let id = ConversationId::new("k3x9").unwrap();
        assert_eq!(id.to_string(), "k3x9");
        assert_eq!(id, "k3x9");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = ConversationId::new("abc").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
