//! Render-ready message types.
//!
//! A [`Message`] is the displayable form of one conversation turn: its body
//! has already been rendered and split into [`Chunk`]s.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

// Role string constants
const ROLE_USER: &str = "user";
const ROLE_ASSISTANT: &str = "assistant";

// ===== Role =====

/// Author of a conversation turn.
///
/// Unknown roles are kept verbatim so nothing the backend sends is lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// Turn written by the user
    User,
    /// Turn written by the assistant model
    Assistant,
    /// Any other role string (e.g. "system")
    Other(String),
}

impl Role {
    /// Classify a raw role string.
    pub fn parse(raw: &str) -> Self {
        match raw {
            ROLE_USER => Role::User,
            ROLE_ASSISTANT => Role::Assistant,
            other => Role::Other(other.to_string()),
        }
    }

    /// The role as the backend spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => ROLE_USER,
            Role::Assistant => ROLE_ASSISTANT,
            Role::Other(s) => s,
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ===== Chunk =====

/// One unit of a rendered message body.
///
/// Sum type: a chunk is either display HTML or an identified code block,
/// never both. The UI inserts fragments directly and routes code blocks
/// through its own code widget keyed by `language`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chunk {
    /// Serialized markup of one top-level node.
    HtmlFragment {
        /// Outer HTML of the node.
        html: String,
    },
    /// A `<pre><code>` block.
    CodeBlock {
        /// First class on the `<code>` element, empty if it had none.
        language: String,
        /// Text content of the `<code>` element, tags stripped and entities decoded.
        code: String,
    },
}

impl Chunk {
    /// Build an HTML fragment chunk.
    pub fn html(html: impl Into<String>) -> Self {
        Chunk::HtmlFragment { html: html.into() }
    }

    /// Build a code block chunk.
    pub fn code(language: impl Into<String>, code: impl Into<String>) -> Self {
        Chunk::CodeBlock {
            language: language.into(),
            code: code.into(),
        }
    }

    /// True for [`Chunk::CodeBlock`].
    pub fn is_code(&self) -> bool {
        matches!(self, Chunk::CodeBlock { .. })
    }
}

// ===== Message =====

/// A rendered conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    role: Role,
    timestamp: Option<DateTime<Utc>>,
    chunks: Vec<Chunk>,
}

impl Message {
    /// Create a message from its parts.
    pub fn new(role: Role, timestamp: Option<DateTime<Utc>>, chunks: Vec<Chunk>) -> Self {
        Self {
            role,
            timestamp,
            chunks,
        }
    }

    /// Who wrote this turn.
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// When the turn was recorded, if the backend said.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Rendered body, in document order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }
}
