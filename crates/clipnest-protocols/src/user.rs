//! User credential and profile types.

use serde::{Deserialize, Serialize};

/// A credential cached from the web app's sign-in flow.
///
/// Read-only from the runtime's perspective; treated as invalid if absent or
/// if the remote backend answers unauthorized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserCredential {
    /// Opaque user identifier.
    pub id: String,
    /// Bearer token for remote API calls.
    pub token: String,
}

/// The cached "current user" profile, one slot, no multi-account support.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub credential: UserCredential,
    /// Display name, if the sign-in flow supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// When this profile was cached locally.
    pub cached_at: chrono::DateTime<chrono::Utc>,
}

impl UserProfile {
    /// Create a profile cached now.
    pub fn new(id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            credential: UserCredential {
                id: id.into(),
                token: token.into(),
            },
            name: None,
            cached_at: chrono::Utc::now(),
        }
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The bearer token used on every remote call.
    pub fn token(&self) -> &str {
        &self.credential.token
    }
}
