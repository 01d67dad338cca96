//! The closed set of messages exchanged between execution contexts.
//!
//! Contexts (background, per-page, panel) share no memory; everything crosses
//! the boundary as a tagged [`ContextMessage`]. Requests carry a correlation
//! id on the wire (see the router crate's framing); responses are plain JSON
//! payloads decoded with [`decode_response`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RouterError;
use crate::remote::ProxyRequest;
use crate::user::{UserCredential, UserProfile};

/// A message exchanged between execution contexts.
///
/// This set is closed: receive loops warn and drop anything else. Messages
/// are fire-and-forget with an optional single correlated response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ContextMessage {
    /// Router -> page: open (or re-focus) the save UI. Fire-and-forget.
    ToggleSaveUi,
    /// Page -> router: read the cached session cookie. Responds with
    /// [`CredentialResponse`].
    GetSessionCredential,
    /// Page -> router: perform an HTTP call on the page's behalf. The page
    /// context cannot reach the network directly. Responds with
    /// [`crate::remote::ProxyOutcome`].
    ProxyApiRequest(ProxyRequest),
    /// Page -> background: the web app reported a sign-in; persist the
    /// profile. Responds with [`AuthAck`].
    AuthUpdated { user: UserProfile },
}

impl ContextMessage {
    /// Stable kind tag, used for handler registry keys and logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ToggleSaveUi => "toggle_save_ui",
            Self::GetSessionCredential => "get_session_credential",
            Self::ProxyApiRequest(_) => "proxy_api_request",
            Self::AuthUpdated { .. } => "auth_updated",
        }
    }
}

/// Response to [`ContextMessage::GetSessionCredential`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialResponse {
    /// `None` when no session cookie is present; the gate then redirects to
    /// sign-in.
    pub credential: Option<UserCredential>,
}

/// Response to [`ContextMessage::AuthUpdated`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthAck {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthAck {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Decode a raw response payload into its typed shape.
pub fn decode_response<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, RouterError> {
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
