//! Raw backend records to render-ready conversations.
//!
//! The adapter is the parse boundary: ids are unwrapped, timestamps parsed,
//! and each message body rendered and split into chunks. A record that cannot
//! be adapted is an error, never a conversation with a placeholder id or
//! time.

pub mod timestamp;

pub use timestamp::parse_instant;

use tracing::debug;

use crate::model::{
    Conversation, ConversationError, ConversationId, Message, RawConversation, RawMessage, Role,
};
use crate::render::{extract, MarkdownRenderer};

/// Turns [`RawConversation`]s into [`Conversation`]s.
#[derive(Clone, Copy)]
pub struct ConversationAdapter {
    renderer: MarkdownRenderer,
    highlight: bool,
}

impl ConversationAdapter {
    /// Adapter that renders with syntax highlighting.
    pub fn new(renderer: MarkdownRenderer) -> Self {
        Self {
            renderer,
            highlight: true,
        }
    }

    /// Toggle highlighting of message bodies (on by default).
    pub fn with_highlighting(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    /// Adapt one record.
    ///
    /// # Errors
    ///
    /// - [`ConversationError::MalformedIdentifier`] if the id lacks the
    ///   `{"id": {"String": ...}}` wrapper or the key is empty.
    /// - [`ConversationError::MalformedTimestamp`] if any timestamp is unparsable.
    pub fn adapt(&self, raw: RawConversation) -> Result<Conversation, ConversationError> {
        let id = unwrap_id(&raw)?;
        let start_time = parse_instant(&raw.start_time, "start_time")?;
        let modified_time = parse_instant(&raw.modified_time, "modified_time")?;

        let messages = raw
            .messages
            .iter()
            .map(|message| self.adapt_message(message))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            id = %id,
            messages = messages.len(),
            "Adapted conversation"
        );

        Ok(Conversation::new(
            id,
            raw.name,
            start_time,
            modified_time,
            messages,
        ))
    }

    /// Adapt records in order, stopping at the first failure.
    pub fn adapt_list(
        &self,
        raws: Vec<RawConversation>,
    ) -> Result<Vec<Conversation>, ConversationError> {
        raws.into_iter().map(|raw| self.adapt(raw)).collect()
    }

    fn adapt_message(&self, raw: &RawMessage) -> Result<Message, ConversationError> {
        let timestamp = raw
            .timestamp
            .as_deref()
            .map(|ts| parse_instant(ts, "timestamp"))
            .transpose()?;

        let html = if self.highlight {
            self.renderer.render_highlighted(&raw.content)
        } else {
            self.renderer.render(&raw.content)
        };

        Ok(Message::new(Role::parse(&raw.role), timestamp, extract(&html)))
    }
}

impl Default for ConversationAdapter {
    fn default() -> Self {
        Self::new(MarkdownRenderer::default())
    }
}

fn unwrap_id(raw: &RawConversation) -> Result<ConversationId, ConversationError> {
    raw.record_key()
        .and_then(|key| ConversationId::new(key).ok())
        .ok_or_else(|| ConversationError::MalformedIdentifier {
            raw: raw.id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Chunk;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn raw(id: serde_json::Value, messages: Vec<RawMessage>) -> RawConversation {
        RawConversation {
            id,
            name: "T".to_string(),
            start_time: "2024-01-01T00:00:00Z".to_string(),
            modified_time: "2024-01-02T00:00:00Z".to_string(),
            messages,
        }
    }

    fn msg(role: &str, content: &str) -> RawMessage {
        RawMessage {
            timestamp: Some("2024-01-01T12:00:00Z".to_string()),
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    fn wrapped(key: &str) -> serde_json::Value {
        json!({"tb": "conversation", "id": {"String": key}})
    }

    #[test]
    fn adapts_ids_and_times() {
        let conv = ConversationAdapter::default()
            .adapt(raw(wrapped("abc"), vec![]))
            .unwrap();
        assert_eq!(conv.id(), "abc");
        assert_eq!(conv.name(), "T");
        assert_eq!(
            conv.start_time(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            conv.modified_time(),
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
        );
        assert!(conv.messages().is_empty());
    }

    #[test]
    fn rejects_unwrapped_id() {
        for id in [json!("abc"), json!({"String": "abc"}), json!({"id": 7}), json!(null)] {
            let err = ConversationAdapter::default()
                .adapt(raw(id.clone(), vec![]))
                .unwrap_err();
            assert!(
                matches!(err, ConversationError::MalformedIdentifier { .. }),
                "id {id} should be malformed"
            );
        }
    }

    #[test]
    fn rejects_empty_key() {
        let err = ConversationAdapter::default()
            .adapt(raw(wrapped(""), vec![]))
            .unwrap_err();
        assert!(matches!(err, ConversationError::MalformedIdentifier { .. }));
    }

    #[test]
    fn rejects_bad_modified_time() {
        let mut record = raw(wrapped("abc"), vec![]);
        record.modified_time = "soon".to_string();
        let err = ConversationAdapter::default().adapt(record).unwrap_err();
        assert!(matches!(
            err,
            ConversationError::MalformedTimestamp {
                field: "modified_time",
                ..
            }
        ));
    }

    #[test]
    fn rejects_bad_message_timestamp() {
        let mut bad = msg("user", "hi");
        bad.timestamp = Some("???".to_string());
        let err = ConversationAdapter::default()
            .adapt(raw(wrapped("abc"), vec![bad]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConversationError::MalformedTimestamp {
                field: "timestamp",
                ..
            }
        ));
    }

    #[test]
    fn messages_keep_order_role_and_chunks() {
        let conv = ConversationAdapter::default()
            .adapt(raw(
                wrapped("abc"),
                vec![
                    msg("user", "How?"),
                    msg("assistant", "Like this:\n\n```rust\nfn f() {}\n```"),
                    msg("system", "note"),
                ],
            ))
            .unwrap();

        let roles: Vec<&str> = conv.messages().iter().map(|m| m.role().as_str()).collect();
        assert_eq!(roles, vec!["user", "assistant", "system"]);

        let answer = conv.messages()[1].chunks();
        assert_eq!(answer.len(), 2);
        assert!(matches!(&answer[0], Chunk::HtmlFragment { html } if html == "<p>Like this:</p>"));
        assert_eq!(answer[1], Chunk::code("rust", "fn f() {}"));
    }

    #[test]
    fn plain_adapter_skips_highlighting() {
        let conv = ConversationAdapter::default()
            .with_highlighting(false)
            .adapt(raw(wrapped("abc"), vec![msg("user", "Hello `world`")]))
            .unwrap();
        assert_eq!(
            conv.messages()[0].chunks(),
            &[Chunk::html("<p>Hello <code>world</code></p>")]
        );
    }

    #[test]
    fn missing_message_timestamp_is_none() {
        let mut m = msg("user", "x");
        m.timestamp = None;
        let conv = ConversationAdapter::default()
            .adapt(raw(wrapped("abc"), vec![m]))
            .unwrap();
        assert_eq!(conv.messages()[0].timestamp(), None);
    }

    #[test]
    fn adapt_list_stops_at_first_failure() {
        let result = ConversationAdapter::default().adapt_list(vec![
            raw(wrapped("ok"), vec![]),
            raw(json!("bad"), vec![]),
        ]);
        assert!(matches!(
            result,
            Err(ConversationError::MalformedIdentifier { .. })
        ));
    }
}
