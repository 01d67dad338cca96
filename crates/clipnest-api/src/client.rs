//! Remote collection API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use clipnest_protocols::{ApiError, CreateItem, PageSnapshot, RemoteApi};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("clipnest/", env!("CARGO_PKG_VERSION"));

/// `POST /items` response body.
#[derive(Debug, Deserialize)]
struct CreatedEnvelope {
    data: CreatedItem,
}

#[derive(Debug, Deserialize)]
struct CreatedItem {
    id: String,
}

/// HTTP implementation of the remote collection API.
pub struct HttpRemoteApi {
    client: Client,
    base_url: String,
}

impl HttpRemoteApi {
    /// Create a client against the given app base URL (the `/api/v3` prefix
    /// is appended here).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v3{}", self.base_url, path)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::RequestFailed(format!("{status}: {body}")))
    }
}

#[async_trait]
impl RemoteApi for HttpRemoteApi {
    async fn create_item(&self, token: &str, item: &CreateItem) -> Result<String, ApiError> {
        debug!(url = %item.url, "creating item");
        let response = self
            .client
            .post(self.endpoint("/items"))
            .bearer_auth(token)
            .json(&serde_json::json!({ "item": item }))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let envelope: CreatedEnvelope = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        debug!(id = %envelope.data.id, "item created");
        Ok(envelope.data.id)
    }

    async fn update_item(
        &self,
        token: &str,
        item_id: &str,
        snapshot: &PageSnapshot,
    ) -> Result<(), ApiError> {
        debug!(item_id, "updating item");
        let response = self
            .client
            .put(self.endpoint("/items"))
            .bearer_auth(token)
            .json(&serde_json::json!({
                "itemId": item_id,
                "updatedData": snapshot,
            }))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn delete_items(&self, token: &str, item_ids: &[String]) -> Result<(), ApiError> {
        debug!(count = item_ids.len(), "deleting items");
        let response = self
            .client
            .delete(self.endpoint("/items/delete"))
            .bearer_auth(token)
            .json(&serde_json::json!({ "itemIds": item_ids }))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
