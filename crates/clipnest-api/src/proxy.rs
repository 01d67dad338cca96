//! Raw request executor for the `ProxyApiRequest` relay.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::debug;

use clipnest_protocols::{ProxyExecutor, ProxyOutcome, ProxyRequest};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executes caller-supplied requests verbatim: method, URL, headers and body
/// all come from the relaying page context. Every failure mode collapses to
/// a `{success: false, error}` outcome for display.
pub struct HttpProxyExecutor {
    client: Client,
}

impl HttpProxyExecutor {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    async fn run(&self, request: ProxyRequest) -> Result<serde_json::Value, String> {
        let method = Method::from_bytes(request.method.to_uppercase().as_bytes())
            .map_err(|_| format!("Unsupported method: {}", request.method))?;

        let mut builder = self.client.request(method, &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = request.body {
            builder = builder.json(&body);
        }

        let response = builder.send().await.map_err(|e| e.to_string())?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("{status}: {body}"));
        }

        // Non-JSON bodies come back as a plain string value.
        let text = response.text().await.map_err(|e| e.to_string())?;
        if text.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }
}

impl Default for HttpProxyExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProxyExecutor for HttpProxyExecutor {
    async fn execute(&self, request: ProxyRequest) -> ProxyOutcome {
        debug!(method = %request.method, url = %request.url, "executing relayed request");
        match self.run(request).await {
            Ok(data) => ProxyOutcome::ok(data),
            Err(error) => ProxyOutcome::failed(error),
        }
    }
}

#[cfg(test)]
#[path = "proxy_tests.rs"]
mod tests;
