//! In-memory seam implementations.
//!
//! Used by tests and by hosts that manage their own persistence.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use clipnest_protocols::{CookieJar, SignInRedirect, StoreError, UserProfile, UserStore};

/// A user store holding the slot in memory only.
#[derive(Default)]
pub struct MemoryUserStore {
    user: RwLock<Option<UserProfile>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the slot.
    pub fn with_user(profile: UserProfile) -> Self {
        Self {
            user: RwLock::new(Some(profile)),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_user(&self) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.user.read().clone())
    }

    async fn set_user(&self, profile: UserProfile) -> Result<(), StoreError> {
        *self.user.write() = Some(profile);
        Ok(())
    }

    async fn clear_user(&self) -> Result<(), StoreError> {
        *self.user.write() = None;
        Ok(())
    }
}

/// A settable cookie jar.
#[derive(Default)]
pub struct MemoryCookieJar {
    cookie: RwLock<Option<String>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(value: impl Into<String>) -> Self {
        Self {
            cookie: RwLock::new(Some(value.into())),
        }
    }

    /// Simulate sign-in/sign-out from the host side.
    pub fn set_session(&self, value: Option<String>) {
        *self.cookie.write() = value;
    }
}

#[async_trait]
impl CookieJar for MemoryCookieJar {
    async fn session_cookie(&self) -> Option<String> {
        self.cookie.read().clone()
    }
}

/// Counts sign-in redirects instead of opening anything.
#[derive(Default)]
pub struct RecordingSignIn {
    opened: AtomicUsize,
}

impl RecordingSignIn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn times_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SignInRedirect for RecordingSignIn {
    async fn open_sign_in(&self) {
        self.opened.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
