//! The in-page save panel and its toggle handler.

use std::sync::Arc;

use async_trait::async_trait;
use clipnest_extract::DocumentSource;
use clipnest_protocols::{ContextMessage, LifecycleState, RemoteApi, SessionError};
use clipnest_router::MessageHandler;
use clipnest_session::{SaveSession, SessionGate};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Save UI state for one page context.
///
/// The panel opens on a trigger and runs the save flow through a
/// [`SaveSession`]. The session lives for one open-to-close cycle: while the
/// panel stays open, further triggers only re-focus the running session, but
/// closing discards it, and a finished (deleted or failed) session is
/// discarded on the next trigger too. Reopening always starts a fresh flow.
pub struct Panel {
    gate: SessionGate,
    api: Arc<dyn RemoteApi>,
    session: Option<SaveSession>,
    open: bool,
}

impl Panel {
    pub fn new(gate: SessionGate, api: Arc<dyn RemoteApi>) -> Self {
        Self {
            gate,
            api,
            session: None,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn session(&self) -> Option<&SaveSession> {
        self.session.as_ref()
    }

    /// The live session, for edits and update/delete calls from the UI.
    pub fn session_mut(&mut self) -> Option<&mut SaveSession> {
        self.session.as_mut()
    }

    /// React to a user trigger.
    ///
    /// Opening the panel checks authentication and runs the save flow.
    /// Failing the auth check leaves the panel open showing the sign-in
    /// prompt. A save failure keeps the session so the UI can show its error
    /// state, but only until the next trigger: a terminal session (deleted,
    /// or failed before a remote item existed) is discarded then, and a
    /// fresh flow runs. A trigger while a live session is open only
    /// re-focuses the panel.
    pub async fn handle_toggle(
        &mut self,
        source: &dyn DocumentSource,
    ) -> Result<(), SessionError> {
        self.open = true;

        if let Some(session) = &self.session {
            let state = session.state();
            // Idle means the flow never ran (the page was rejected before
            // any remote call); both that and a terminal state get a fresh
            // attempt.
            if !state.is_terminal() && state != LifecycleState::Idle {
                debug!("panel re-focused, save flow already running");
                return Ok(());
            }
            debug!(%state, "discarding finished session");
            self.session = None;
        }

        let profile = self.gate.check_auth().await?;
        let document = source.observe()?;

        let mut session = SaveSession::new(self.api.clone(), profile);
        let outcome = session.start(&document).await;
        self.session = Some(session);
        outcome
    }

    /// Hide the panel, discarding its session. The next trigger starts a
    /// fresh flow.
    pub fn close(&mut self) {
        self.open = false;
        self.session = None;
    }
}

/// Bridges `toggle_save_ui` notifications from the transport to the panel.
pub struct ToggleHandler {
    panel: Arc<Mutex<Panel>>,
    source: Arc<dyn DocumentSource>,
}

impl ToggleHandler {
    pub fn new(panel: Arc<Mutex<Panel>>, source: Arc<dyn DocumentSource>) -> Self {
        Self { panel, source }
    }
}

#[async_trait]
impl MessageHandler for ToggleHandler {
    async fn handle(&self, message: ContextMessage) -> Result<Value, String> {
        match message {
            ContextMessage::ToggleSaveUi => {
                let mut panel = self.panel.lock().await;
                if let Err(error) = panel.handle_toggle(self.source.as_ref()).await {
                    // The panel keeps showing its own error or sign-in
                    // state; the trigger itself never fails.
                    warn!(%error, "save flow failed");
                }
                Ok(Value::Null)
            }
            other => Err(format!("Unexpected message: {}", other.kind())),
        }
    }
}
