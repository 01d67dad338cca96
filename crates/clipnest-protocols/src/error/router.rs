//! Cross-context messaging errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    /// The peer context's channel is gone (context shut down or UI closed).
    #[error("Context channel closed")]
    ChannelClosed,

    /// A request waited too long for its correlated response.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// No handler is registered for the message kind.
    #[error("No handler registered for message kind: {0}")]
    NoHandler(String),

    /// The responding handler reported a failure.
    #[error("Handler failed: {0}")]
    Handler(String),

    /// A response payload could not be decoded into the expected shape.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
