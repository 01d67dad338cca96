//! Local user seams: profile store, cookie jar, sign-in redirect.
//!
//! All three wrap browser-adjacent facilities the page context cannot touch
//! directly. The store is durable across the runtime's lifetime and holds a
//! single "current user" slot.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::user::UserProfile;

/// The durable single-slot user profile cache.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Read the cached profile, `None` when nobody is signed in.
    async fn get_user(&self) -> Result<Option<UserProfile>, StoreError>;

    /// Replace the cached profile.
    async fn set_user(&self, profile: UserProfile) -> Result<(), StoreError>;

    /// Drop the cached profile.
    async fn clear_user(&self) -> Result<(), StoreError>;
}

/// Read access to the web app's session cookie.
///
/// Only the background context may consult this; page contexts go through the
/// `GetSessionCredential` relay.
#[async_trait]
pub trait CookieJar: Send + Sync {
    /// The session cookie value, `None` when no session exists.
    async fn session_cookie(&self) -> Option<String>;
}

/// Opens the external sign-in page when no valid session exists.
#[async_trait]
pub trait SignInRedirect: Send + Sync {
    async fn open_sign_in(&self);
}
