//! The session gate: authentication before anything else.

use std::sync::Arc;

use tracing::{debug, info};

use clipnest_protocols::{
    ContextMessage, CredentialResponse, SessionError, SignInRedirect, UserProfile, UserStore,
};
use clipnest_router::ContextBus;

/// Gates every save/UI-open flow on a valid signed-in session.
///
/// Runs in the page context, which cannot read cookies itself; the cookie
/// check is relayed through the background router. The profile cache is
/// directly readable from any context.
pub struct SessionGate {
    bus: Arc<ContextBus>,
    store: Arc<dyn UserStore>,
    signin: Arc<dyn SignInRedirect>,
}

impl SessionGate {
    pub fn new(
        bus: Arc<ContextBus>,
        store: Arc<dyn UserStore>,
        signin: Arc<dyn SignInRedirect>,
    ) -> Self {
        Self { bus, store, signin }
    }

    /// Resolve the current user, or halt the flow.
    ///
    /// No session cookie: the external sign-in page is opened and
    /// [`SessionError::AuthRequired`] is returned; nothing else runs this
    /// session. A cookie without a cached profile also halts (the profile
    /// carries the bearer token), but without redirecting again - the web
    /// app will re-announce the user on its next sign-in.
    pub async fn check_auth(&self) -> Result<UserProfile, SessionError> {
        let response: CredentialResponse = self
            .bus
            .request_typed(ContextMessage::GetSessionCredential)
            .await?;

        let Some(credential) = response.credential else {
            info!("no session cookie, redirecting to sign-in");
            self.signin.open_sign_in().await;
            return Err(SessionError::AuthRequired);
        };

        let Some(profile) = self
            .store
            .get_user()
            .await
            .map_err(|e| SessionError::Remote(e.to_string()))?
        else {
            info!("session cookie present but no cached profile");
            return Err(SessionError::AuthRequired);
        };

        if profile.credential.id != credential.id {
            // Stale cache from a previous account; treat as signed out.
            info!("cached profile does not match session credential");
            return Err(SessionError::AuthRequired);
        }

        debug!(user = %profile.credential.id, "auth gate passed");
        Ok(profile)
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
