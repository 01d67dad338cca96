//! Background-side relay handlers.
//!
//! Page contexts cannot reach cookies, local storage or the network under the
//! extension security boundary; these handlers answer the relayed requests on
//! their behalf.

use std::sync::Arc;

use async_trait::async_trait;
use clipnest_protocols::{
    AuthAck, ContextMessage, CookieJar, CredentialResponse, ProxyExecutor, UserStore,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::registry::MessageHandler;

/// Answers `GetSessionCredential` from the session cookie.
pub struct CredentialHandler {
    jar: Arc<dyn CookieJar>,
    store: Arc<dyn UserStore>,
}

impl CredentialHandler {
    pub fn new(jar: Arc<dyn CookieJar>, store: Arc<dyn UserStore>) -> Self {
        Self { jar, store }
    }
}

#[async_trait]
impl MessageHandler for CredentialHandler {
    async fn handle(&self, _message: ContextMessage) -> Result<Value, String> {
        // No cookie means no session, full stop; the cached profile alone
        // cannot authorize anything.
        let credential = match self.jar.session_cookie().await {
            Some(_) => match self.store.get_user().await {
                Ok(profile) => profile.map(|p| p.credential),
                Err(error) => {
                    warn!(%error, "user store read failed during credential relay");
                    None
                }
            },
            None => None,
        };
        debug!(present = credential.is_some(), "credential relay answered");
        encode(&CredentialResponse { credential })
    }
}

/// Answers `ProxyApiRequest` by executing the HTTP call in the background
/// context. Failures come back as `{success: false}` payloads; the relay
/// itself never fails the transport.
pub struct ProxyHandler {
    executor: Arc<dyn ProxyExecutor>,
}

impl ProxyHandler {
    pub fn new(executor: Arc<dyn ProxyExecutor>) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl MessageHandler for ProxyHandler {
    async fn handle(&self, message: ContextMessage) -> Result<Value, String> {
        let ContextMessage::ProxyApiRequest(request) = message else {
            return Err("proxy handler received wrong message kind".to_string());
        };
        debug!(method = %request.method, url = %request.url, "relaying api request");
        let outcome = self.executor.execute(request).await;
        encode(&outcome)
    }
}

/// Answers `AuthUpdated` by persisting the reported profile.
pub struct AuthUpdatedHandler {
    store: Arc<dyn UserStore>,
}

impl AuthUpdatedHandler {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessageHandler for AuthUpdatedHandler {
    async fn handle(&self, message: ContextMessage) -> Result<Value, String> {
        let ContextMessage::AuthUpdated { user } = message else {
            return Err("auth handler received wrong message kind".to_string());
        };
        let ack = match self.store.set_user(user).await {
            Ok(()) => AuthAck::ok(),
            Err(error) => {
                warn!(%error, "failed to persist signed-in user");
                AuthAck::failed(error.to_string())
            }
        };
        encode(&ack)
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
