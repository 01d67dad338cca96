//! The save-session controller.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use clipnest_extract::{PageDocument, extract};
use clipnest_protocols::{
    CreateItem, ExtractError, LifecycleState, PageSnapshot, RemoteApi, SavedItem, SessionError,
    UserProfile,
};

/// How long the UI shows the delete confirmation before auto-closing.
pub const DELETED_DISPLAY_WINDOW: Duration = Duration::from_secs(4);

/// Drives one saved item through its lifecycle for a single UI open-to-close
/// cycle.
///
/// Constructed when the save UI opens (after the gate passes), discarded when
/// it closes; never shared across sessions. All transitions go through
/// `&mut self`, so they are serialized by construction. There is no
/// cancellation: a closed UI stops rendering outcomes, not the calls.
pub struct SaveSession {
    id: Uuid,
    api: Arc<dyn RemoteApi>,
    profile: UserProfile,
    item: SavedItem,
    /// The quick-save/enrich flow already ran (or is running); a re-trigger
    /// only re-opens the UI.
    started: bool,
    last_error: Option<String>,
}

impl SaveSession {
    pub fn new(api: Arc<dyn RemoteApi>, profile: UserProfile) -> Self {
        let id = Uuid::new_v4();
        debug!(session = %id, user = %profile.credential.id, "save session opened");
        Self {
            id,
            api,
            profile,
            item: SavedItem::default(),
            started: false,
            last_error: None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.item.state
    }

    pub fn remote_id(&self) -> Option<&str> {
        self.item.remote_id.as_deref()
    }

    pub fn snapshot(&self) -> &PageSnapshot {
        &self.item.snapshot
    }

    /// The most recent displayable failure, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Run the full save flow for the observed page: quick save first for
    /// latency, then best-effort enrichment.
    ///
    /// Re-invoking while the flow already ran (a re-trigger re-opening the
    /// UI) is a no-op. A quick-save failure is final for this session;
    /// enrichment is never attempted after it. An enrichment failure is
    /// surfaced through [`SaveSession::last_error`] but leaves the quick
    /// save intact.
    pub async fn start(&mut self, document: &PageDocument) -> Result<(), SessionError> {
        if self.started {
            debug!(session = %self.id, "save flow already started, re-opening UI only");
            return Ok(());
        }

        // Validated before any remote call: a non-http page is never saved.
        if !document.location.starts_with("http") {
            return Err(ExtractError::InvalidProtocol(document.location.clone()).into());
        }
        self.started = true;

        self.quick_save(document).await?;

        if let Err(error) = self.enrich(document).await {
            warn!(session = %self.id, %error, "enrichment failed, quick save stands");
            self.last_error = Some(error.to_string());
        }
        Ok(())
    }

    /// Quick save: the minimal item, submitted immediately so the user gets
    /// confirmation before extraction completes.
    async fn quick_save(&mut self, document: &PageDocument) -> Result<(), SessionError> {
        self.item.state = LifecycleState::Saving;

        let mut item = CreateItem::new(document.location.clone());
        if !document.title.is_empty() {
            item = item.with_title(document.title.clone());
        }
        if let Some(description) = document.meta_named("description") {
            item = item.with_description(description);
        }

        match self.api.create_item(self.profile.token(), &item).await {
            Ok(remote_id) => {
                info!(session = %self.id, %remote_id, "quick save succeeded");
                self.item.remote_id = Some(remote_id);
                self.item.snapshot = PageSnapshot {
                    title: document.title.clone(),
                    description: item.description.clone().unwrap_or_default(),
                    source_url: document.location.clone(),
                    ..PageSnapshot::default()
                };
                self.item.state = LifecycleState::Saved;
                self.last_error = None;
                Ok(())
            }
            Err(error) => {
                warn!(session = %self.id, %error, "quick save failed");
                self.item.state = LifecycleState::Error;
                let message = error.to_string();
                self.last_error = Some(message.clone());
                Err(SessionError::Remote(message))
            }
        }
    }

    /// Enrichment: extract the full snapshot and push it to the already
    /// created item.
    async fn enrich(&mut self, document: &PageDocument) -> Result<(), SessionError> {
        let Some(remote_id) = self.item.remote_id.clone() else {
            return Err(SessionError::NoActiveItem);
        };

        let mut snapshot = extract(document)?;
        // The quick save already fixed title and URL for this session.
        if snapshot.title.is_empty() {
            snapshot.title = self.item.snapshot.title.clone();
        }
        snapshot.source_url = self.item.snapshot.source_url.clone();

        self.item.state = LifecycleState::Updating;
        match self
            .api
            .update_item(self.profile.token(), &remote_id, &snapshot)
            .await
        {
            Ok(()) => {
                debug!(session = %self.id, %remote_id, "enrichment applied");
                self.item.snapshot = snapshot;
                self.item.state = LifecycleState::Saved;
                Ok(())
            }
            Err(error) => {
                // Non-fatal: the quick save stands and the id stays valid.
                self.item.state = LifecycleState::Saved;
                Err(SessionError::Remote(error.to_string()))
            }
        }
    }

    /// Edit the in-memory title; nothing is sent until
    /// [`SaveSession::update`].
    pub fn edit_title(&mut self, title: impl Into<String>) {
        self.item.snapshot.title = title.into();
    }

    /// Edit the in-memory description; nothing is sent until
    /// [`SaveSession::update`].
    pub fn edit_description(&mut self, description: impl Into<String>) {
        self.item.snapshot.description = description.into();
    }

    /// Push the current (possibly user-edited) snapshot to the remote item.
    /// Idempotent: the backend is last-write-wins and repeated identical
    /// payloads are safe.
    pub async fn update(&mut self) -> Result<(), SessionError> {
        let Some(remote_id) = self.item.remote_id.clone() else {
            return Err(SessionError::NoActiveItem);
        };

        self.item.state = LifecycleState::Updating;
        match self
            .api
            .update_item(self.profile.token(), &remote_id, &self.item.snapshot)
            .await
        {
            Ok(()) => {
                debug!(session = %self.id, %remote_id, "update applied");
                self.item.state = LifecycleState::Saved;
                self.last_error = None;
                Ok(())
            }
            Err(error) => {
                self.item.state = LifecycleState::Saved;
                let message = error.to_string();
                self.last_error = Some(message.clone());
                Err(SessionError::Remote(message))
            }
        }
    }

    /// Delete the remote item. On success the session is terminal and the
    /// returned window tells the UI how long to show the confirmation before
    /// auto-closing.
    pub async fn delete(&mut self) -> Result<Duration, SessionError> {
        let Some(remote_id) = self.item.remote_id.clone() else {
            return Err(SessionError::NoActiveItem);
        };

        match self
            .api
            .delete_items(self.profile.token(), std::slice::from_ref(&remote_id))
            .await
        {
            Ok(()) => {
                info!(session = %self.id, %remote_id, "item deleted");
                self.item.remote_id = None;
                self.item.state = LifecycleState::Deleted;
                self.last_error = None;
                Ok(DELETED_DISPLAY_WINDOW)
            }
            Err(error) => {
                let message = error.to_string();
                self.last_error = Some(message.clone());
                Err(SessionError::Remote(message))
            }
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
