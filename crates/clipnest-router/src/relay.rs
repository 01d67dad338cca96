//! Page-side remote API over the proxy relay.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use clipnest_protocols::{
    ApiError, ContextMessage, CreateItem, PageSnapshot, ProxyOutcome, ProxyRequest, RemoteApi,
    RouterError,
};

use crate::bus::ContextBus;

/// Implements the remote API contract from inside a page context, where no
/// direct network access exists: every call becomes a `ProxyApiRequest`
/// relayed through the background router.
pub struct RelayRemoteApi {
    bus: Arc<ContextBus>,
    base_url: String,
}

impl RelayRemoteApi {
    pub fn new(bus: Arc<ContextBus>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { bus, base_url }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v3{}", self.base_url, path)
    }

    async fn relay(
        &self,
        token: &str,
        method: &str,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        let request = ProxyRequest {
            url: self.endpoint(path),
            method: method.to_string(),
            headers: [
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), format!("Bearer {token}")),
            ]
            .into(),
            body: Some(body),
        };

        debug!(method, path, "relaying api call to background");
        let outcome: ProxyOutcome = self
            .bus
            .request_typed(ContextMessage::ProxyApiRequest(request))
            .await
            .map_err(relay_error)?;

        if !outcome.success {
            return Err(ApiError::RequestFailed(
                outcome.error.unwrap_or_else(|| "request failed".to_string()),
            ));
        }
        Ok(outcome.data.unwrap_or(serde_json::Value::Null))
    }
}

fn relay_error(error: RouterError) -> ApiError {
    ApiError::RequestFailed(error.to_string())
}

#[async_trait]
impl RemoteApi for RelayRemoteApi {
    async fn create_item(&self, token: &str, item: &CreateItem) -> Result<String, ApiError> {
        let data = self
            .relay(token, "POST", "/items", json!({ "item": item }))
            .await?;
        data["data"]["id"]
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| ApiError::InvalidResponse("missing data.id".to_string()))
    }

    async fn update_item(
        &self,
        token: &str,
        item_id: &str,
        snapshot: &PageSnapshot,
    ) -> Result<(), ApiError> {
        self.relay(
            token,
            "PUT",
            "/items",
            json!({ "itemId": item_id, "updatedData": snapshot }),
        )
        .await?;
        Ok(())
    }

    async fn delete_items(&self, token: &str, item_ids: &[String]) -> Result<(), ApiError> {
        self.relay(
            token,
            "DELETE",
            "/items/delete",
            json!({ "itemIds": item_ids }),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
