//! Message handler registry.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use clipnest_protocols::ContextMessage;
use parking_lot::RwLock;
use serde_json::Value;

/// An asynchronous handler for one message kind.
///
/// Handlers run as spawned tasks; the transport keeps the request's response
/// slot open until the handler finishes, however long that takes.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Handle a message, producing the response payload. The error string is
    /// delivered verbatim to the requesting context.
    async fn handle(&self, message: ContextMessage) -> Result<Value, String>;
}

/// Maps message kinds to their handlers.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<&'static str, Arc<dyn MessageHandler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a message kind, replacing any previous one.
    pub fn register(&self, kind: &'static str, handler: Arc<dyn MessageHandler>) {
        self.handlers.write().insert(kind, handler);
    }

    /// Look up the handler for a message kind.
    pub fn get(&self, kind: &str) -> Option<Arc<dyn MessageHandler>> {
        self.handlers.read().get(kind).cloned()
    }
}
