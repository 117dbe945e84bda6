//! Error types for convview.
//!
//! Errors are structured `thiserror` enums that compose via `?` and `From`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the binary
//!   - `ConfigError` / `LoggingError` - Startup failures
//!   - [`InputError`] - Snapshot file/stdin reading failures
//!   - [`ConversationError`] - Adapting backend records into conversations
//!     - [`BackendError`] - Failures reported by the backend boundary
//!   - `serde_json::Error` - Writing JSON output
//!
//! # Recovery Strategy
//!
//! Rendering itself never fails: highlighting degrades to plain text and HTML
//! parsing is permissive. Everything listed here is surfaced to the caller as a
//! distinct failure, because defaulting a bad id or timestamp would corrupt the
//! displayed identity or ordering of a conversation.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error for the `convview` binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file present but unusable.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Failed to read the snapshot document.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// A record could not be turned into a conversation.
    #[error("Failed to load conversation: {0}")]
    Conversation(#[from] ConversationError),

    /// Failed to serialize output.
    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Errors encountered when reading the snapshot from a file or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The snapshot file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use convview::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No file path was given and stdin is an interactive terminal.
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Generic I/O error reading from the input source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning raw backend records into [`Conversation`]s.
///
/// [`Conversation`]: crate::model::Conversation
#[derive(Debug, Error)]
pub enum ConversationError {
    /// The raw id did not have the `{ "id": { "String": ... } }` wrapper shape.
    ///
    /// `raw` holds the offending JSON, rendered compactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use convview::model::error::ConversationError;
    ///
    /// let err = ConversationError::MalformedIdentifier { raw: "42".to_string() };
    /// assert!(err.to_string().contains("42"));
    /// ```
    #[error("Malformed conversation identifier: {raw}")]
    MalformedIdentifier {
        /// The raw identifier value as received.
        raw: String,
    },

    /// A timestamp field could not be parsed as an instant.
    #[error("Malformed timestamp in '{field}': '{raw}'")]
    MalformedTimestamp {
        /// Which record field held the timestamp (e.g. "modified_time").
        field: &'static str,
        /// The raw timestamp text.
        raw: String,
    },

    /// The backend call was rejected or the backend is unreachable.
    ///
    /// Propagated unchanged; this crate never retries.
    #[error("Backend call failed: {0}")]
    RpcFailure(#[from] BackendError),
}

/// Failures reported by a [`ConversationBackend`].
///
/// [`ConversationBackend`]: crate::backend::ConversationBackend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend refused the operation.
    #[error("{operation} rejected: {reason}")]
    Rejected {
        /// Backend operation name (e.g. "find_conversation").
        operation: &'static str,
        /// Reason given by the backend.
        reason: String,
    },

    /// No record exists for the requested id.
    #[error("No conversation with id '{0}'")]
    NotFound(String),

    /// The backend is not reachable.
    #[error("Backend disconnected")]
    Disconnected,

    /// The payload did not match the raw record schema.
    #[error("Undecodable backend payload: {0}")]
    Decode(String),
}
