//! The background-side router.

use async_trait::async_trait;
use clipnest_protocols::{ContextMessage, RouterError};
use tracing::{debug, info};

use crate::bus::ContextBus;

/// Capabilities the background context has over one target page.
///
/// Wraps the host's scripting surface. Probing and injection are best-effort:
/// a page visited for the first time has no extractor yet, and restricted
/// pages refuse injection entirely.
#[async_trait]
pub trait PageContext: Send + Sync {
    /// Is the extractor script already present in this page?
    ///
    /// A probe failure means "absent": the capability query itself needs the
    /// script environment to answer.
    async fn extractor_present(&self) -> bool;

    /// Inject the extractor script into the page.
    async fn inject_extractor(&self) -> Result<(), RouterError>;
}

/// Routes user-invoked actions (toolbar icon, context-menu item) to the
/// target page.
pub struct Router;

impl Router {
    /// Handle a user trigger against the given page.
    ///
    /// Guarantees the extractor is present at most once, then tells the page
    /// to toggle its save UI. Injection failure (restricted page, missing
    /// permission) is a no-op: the UI simply never opens. A re-trigger while
    /// the UI is already open lands as another toggle; the page context
    /// re-focuses its existing session instead of starting a second flow.
    pub async fn on_user_trigger(
        page: &dyn PageContext,
        bus: &ContextBus,
    ) -> Result<(), RouterError> {
        if page.extractor_present().await {
            debug!("extractor already present");
        } else {
            // Expected steady state for a first visit.
            debug!("extractor absent, injecting");
            if let Err(error) = page.inject_extractor().await {
                info!(%error, "extractor injection refused, ignoring trigger");
                return Ok(());
            }
        }
        bus.notify(ContextMessage::ToggleSaveUi).await
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
