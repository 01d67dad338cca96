//! File-backed user store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use clipnest_protocols::{StoreError, UserProfile, UserStore};

const PROFILE_FILE: &str = "user.json";

/// Persists the single current-user profile as JSON on disk.
///
/// Writes go through a temp file and rename so a crash mid-write never
/// leaves a torn profile behind.
pub struct FileUserStore {
    path: PathBuf,
}

impl FileUserStore {
    /// Store under an explicit directory.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(PROFILE_FILE),
        }
    }

    /// Store under the platform data directory (`…/clipnest/user.json`).
    pub fn default_location() -> Option<Self> {
        let dir = dirs::data_dir()?.join("clipnest");
        Some(Self::new(dir))
    }

    /// Where the profile lives on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_sync(path: &Path) -> Result<Option<UserProfile>, StoreError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_sync(path: &Path, profile: &UserProfile) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(profile)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    fn clear_sync(path: &Path) -> Result<(), StoreError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl UserStore for FileUserStore {
    async fn get_user(&self) -> Result<Option<UserProfile>, StoreError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::read_sync(&path))
            .await
            .map_err(|e| StoreError::Io(std::io::Error::other(e)))?
    }

    async fn set_user(&self, profile: UserProfile) -> Result<(), StoreError> {
        let path = self.path.clone();
        debug!(path = %path.display(), "persisting user profile");
        tokio::task::spawn_blocking(move || Self::write_sync(&path, &profile))
            .await
            .map_err(|e| StoreError::Io(std::io::Error::other(e)))?
    }

    async fn clear_user(&self) -> Result<(), StoreError> {
        let path = self.path.clone();
        debug!(path = %path.display(), "clearing user profile");
        tokio::task::spawn_blocking(move || Self::clear_sync(&path))
            .await
            .map_err(|e| StoreError::Io(std::io::Error::other(e)))?
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
