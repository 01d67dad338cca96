//! Remote collection backend contract.
//!
//! The backend is an external collaborator; the runtime consumes this
//! interface and never implements the service side.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::snapshot::PageSnapshot;

/// Minimal item payload for a quick save: just enough for the backend to
/// create the item before extraction finishes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateItem {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateItem {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            description: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Contract of the remote collection API.
///
/// All calls authorize with the caller's bearer token. Failures are uniform:
/// transport errors and non-success statuses both surface as
/// [`ApiError::RequestFailed`].
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// `POST /items` - create a minimal item, returning its remote id.
    async fn create_item(&self, token: &str, item: &CreateItem) -> Result<String, ApiError>;

    /// `PUT /items` - replace the item's metadata. Last write wins; repeated
    /// identical updates are safe.
    async fn update_item(
        &self,
        token: &str,
        item_id: &str,
        snapshot: &PageSnapshot,
    ) -> Result<(), ApiError>;

    /// `DELETE /items/delete` - delete the given items.
    async fn delete_items(&self, token: &str, item_ids: &[String]) -> Result<(), ApiError>;
}

/// A raw HTTP request relayed from a page context, method/url/headers/body
/// all caller-supplied and opaque to the router.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyRequest {
    pub url: String,
    pub method: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl ProxyRequest {
    /// Convenience constructor for a bare GET.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: "GET".to_string(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// Outcome of a relayed request: the parsed body on success, a displayable
/// error string otherwise. The relay itself never fails the transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProxyOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProxyOutcome {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Executes relayed [`ProxyRequest`]s on behalf of page contexts.
#[async_trait]
pub trait ProxyExecutor: Send + Sync {
    async fn execute(&self, request: ProxyRequest) -> ProxyOutcome;
}
