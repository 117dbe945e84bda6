//! Domain model types (pure).
//!
//! Raw backend records, the render-ready entities built from them, and the
//! error taxonomy.

pub mod conversation;
pub mod error;
pub mod identifiers;
pub mod message;
pub mod raw;

// Re-export for convenience
pub use conversation::Conversation;
pub use error::{AppError, BackendError, ConversationError, InputError};
pub use identifiers::{ConversationId, InvalidConversationId};
pub use message::{Chunk, Message, Role};
pub use raw::{RawConversation, RawMessage};
