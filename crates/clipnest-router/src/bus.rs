//! The context bus: a duplex message endpoint between two execution contexts.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use clipnest_protocols::{ContextMessage, RouterError};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace, warn};

use crate::frame::Frame;
use crate::registry::{HandlerRegistry, MessageHandler};

const CHANNEL_CAPACITY: usize = 64;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pending request waiting for its correlated response.
struct PendingRequest {
    tx: oneshot::Sender<Result<Value, String>>,
}

/// One end of a context-pair channel.
///
/// Each context holds exactly one endpoint per peer. Requests are correlated
/// by a monotonically increasing id; the responder slot is registered before
/// the frame is sent so a fast reply cannot be dropped. Handlers registered
/// on the endpoint answer the peer's requests; they run as spawned tasks, so
/// slow asynchronous work keeps its response slot open until it finishes.
pub struct ContextBus {
    /// Local context name, for logs.
    name: &'static str,
    tx: mpsc::Sender<Frame>,
    /// Incoming frames, consumed by [`ContextBus::start`].
    rx: Mutex<Option<mpsc::Receiver<Frame>>>,
    pending: Arc<Mutex<HashMap<u64, PendingRequest>>>,
    next_id: AtomicU64,
    registry: Arc<HandlerRegistry>,
    timeout: Duration,
}

impl ContextBus {
    /// Create a connected pair of endpoints, one per context.
    pub fn pair(a: &'static str, b: &'static str) -> (Self, Self) {
        let (a_tx, b_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (b_tx, a_rx) = mpsc::channel(CHANNEL_CAPACITY);
        (Self::new(a, a_tx, a_rx), Self::new(b, b_tx, b_rx))
    }

    fn new(name: &'static str, tx: mpsc::Sender<Frame>, rx: mpsc::Receiver<Frame>) -> Self {
        Self {
            name,
            tx,
            rx: Mutex::new(Some(rx)),
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(1),
            registry: Arc::new(HandlerRegistry::new()),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Shorten the request timeout (tests).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Register a handler for a message kind arriving from the peer.
    pub fn register(&self, kind: &'static str, handler: Arc<dyn MessageHandler>) {
        self.registry.register(kind, handler);
    }

    /// Start this endpoint's receive loop. Frames arriving before the loop
    /// starts are buffered by the channel. The loop runs at most once: a
    /// second call is a warn-logged no-op returning `None`.
    pub fn start(&self) -> Option<tokio::task::JoinHandle<()>> {
        let Some(rx) = self.rx.lock().take() else {
            warn!(context = self.name, "receive loop already started");
            return None;
        };
        let name = self.name;
        let tx = self.tx.clone();
        let pending = self.pending.clone();
        let registry = self.registry.clone();
        Some(tokio::spawn(Self::receive_loop(
            name, rx, tx, pending, registry,
        )))
    }

    async fn receive_loop(
        name: &'static str,
        mut rx: mpsc::Receiver<Frame>,
        tx: mpsc::Sender<Frame>,
        pending: Arc<Mutex<HashMap<u64, PendingRequest>>>,
        registry: Arc<HandlerRegistry>,
    ) {
        while let Some(frame) = rx.recv().await {
            match frame {
                Frame::Request { id, message } => {
                    trace!(context = name, kind = message.kind(), ?id, "request received");
                    Self::dispatch(name, id, message, &tx, &registry);
                }
                Frame::Response { id, result, error } => {
                    let Some(req) = pending.lock().remove(&id) else {
                        // Late reply after a timeout already gave up on it.
                        debug!(context = name, id, "response with no pending request");
                        continue;
                    };
                    let outcome = match error {
                        Some(message) => Err(message),
                        None => Ok(result.unwrap_or(Value::Null)),
                    };
                    let _ = req.tx.send(outcome);
                }
            }
        }
        debug!(context = name, "context channel closed");
    }

    /// Dispatch one request to its handler as a spawned task, replying on
    /// completion when the request carries an id.
    fn dispatch(
        name: &'static str,
        id: Option<u64>,
        message: ContextMessage,
        tx: &mpsc::Sender<Frame>,
        registry: &Arc<HandlerRegistry>,
    ) {
        let kind = message.kind();
        let Some(handler) = registry.get(kind) else {
            warn!(context = name, kind, "no handler registered, dropping");
            if let Some(id) = id {
                let tx = tx.clone();
                let error = RouterError::NoHandler(kind.to_string()).to_string();
                tokio::spawn(async move {
                    let _ = tx.send(Frame::error(id, error)).await;
                });
            }
            return;
        };

        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = handler.handle(message).await;
            let Some(id) = id else {
                if let Err(error) = outcome {
                    debug!(context = name, kind, %error, "notification handler failed");
                }
                return;
            };
            let frame = match outcome {
                Ok(value) => Frame::response(id, value),
                Err(error) => Frame::error(id, error),
            };
            if tx.send(frame).await.is_err() {
                debug!(context = name, kind, "peer gone before response delivery");
            }
        });
    }

    /// Send a request and wait for its single correlated response.
    pub async fn request(&self, message: ContextMessage) -> Result<Value, RouterError> {
        let kind = message.kind();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);

        // Pending entry goes in before the send; a reply that beats the
        // await below must still find its slot.
        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, PendingRequest { tx });

        if self.tx.send(Frame::request(id, message)).await.is_err() {
            self.pending.lock().remove(&id);
            return Err(RouterError::ChannelClosed);
        }
        trace!(context = self.name, kind, id, "request sent");

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(Ok(value))) => Ok(value),
            Ok(Ok(Err(error))) => Err(RouterError::Handler(error)),
            Ok(Err(_)) => Err(RouterError::ChannelClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(RouterError::Timeout(kind.to_string()))
            }
        }
    }

    /// Send a typed request, decoding the response payload.
    pub async fn request_typed<T: serde::de::DeserializeOwned>(
        &self,
        message: ContextMessage,
    ) -> Result<T, RouterError> {
        let value = self.request(message).await?;
        clipnest_protocols::message::decode_response(value)
    }

    /// Send a fire-and-forget message; no response will ever arrive.
    pub async fn notify(&self, message: ContextMessage) -> Result<(), RouterError> {
        trace!(context = self.name, kind = message.kind(), "notify");
        self.tx
            .send(Frame::notification(message))
            .await
            .map_err(|_| RouterError::ChannelClosed)
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
