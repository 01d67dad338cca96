//! Wire framing for cross-context messages.

use clipnest_protocols::ContextMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One frame on a context channel.
///
/// A request without an id is fire-and-forget: no response is ever sent for
/// it. A request with an id gets exactly one correlated [`Frame::Response`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum Frame {
    Request {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<u64>,
        message: ContextMessage,
    },
    Response {
        id: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        result: Option<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl Frame {
    /// A fire-and-forget request.
    pub fn notification(message: ContextMessage) -> Self {
        Self::Request { id: None, message }
    }

    /// A correlated request.
    pub fn request(id: u64, message: ContextMessage) -> Self {
        Self::Request {
            id: Some(id),
            message,
        }
    }

    /// A successful response.
    pub fn response(id: u64, result: Value) -> Self {
        Self::Response {
            id,
            result: Some(result),
            error: None,
        }
    }

    /// A failed response.
    pub fn error(id: u64, error: impl Into<String>) -> Self {
        Self::Response {
            id,
            result: None,
            error: Some(error.into()),
        }
    }
}
