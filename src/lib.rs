//! convview: conversation view model for chat history.
//!
//! Raw conversation records from a backend store are adapted into typed
//! conversations whose message bodies are rendered from Markdown to HTML,
//! syntax highlighted, and split into chunks a UI can display as HTML
//! fragments or code blocks. Conversations can be bucketed into time
//! windows ("Today", "Yesterday", ...) for a history sidebar.
//!
//! Pipeline:
//!
//! ```text
//! ConversationBackend -> RawConversation -> ConversationAdapter -> Conversation
//!                                             (MarkdownRenderer, chunks::extract)
//! ```

pub mod adapter;
pub mod backend;
pub mod config;
pub mod grouping;
pub mod logging;
pub mod model;
pub mod render;
pub mod source;
