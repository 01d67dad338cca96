//! The save data model: page snapshots and the per-session saved item.

use serde::{Deserialize, Serialize};

/// A normalized, point-in-time record of a page's extractable metadata.
///
/// Produced fresh by each extraction and never mutated by the extractor after
/// return; downstream owners may overlay fields (e.g. resolved absolute URLs
/// or user edits). `source_url` is always an absolute http(s) URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageSnapshot {
    pub title: String,
    pub description: String,
    /// Preview image URL, empty when no suitable image was found.
    #[serde(default)]
    pub image: String,
    /// Favicon URL, empty when the page declares none.
    #[serde(default)]
    pub favicon: String,
    /// The page's location at extraction time.
    #[serde(rename = "url")]
    pub source_url: String,
}

/// Lifecycle of one saved item within a single save session.
///
/// `Deleted` and `Error` are terminal; reopening the session UI starts a
/// fresh item at `Idle`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    #[default]
    Idle,
    /// Quick save in flight.
    Saving,
    /// The item exists remotely under `remote_id`.
    Saved,
    /// An enrichment or user-edit update is in flight.
    Updating,
    /// The item was deleted at the user's request.
    Deleted,
    /// The quick save failed; no remote item exists for this session.
    Error,
}

impl LifecycleState {
    /// Whether the session can accept no further remote operations.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Deleted | Self::Error)
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Saving => "saving",
            Self::Saved => "saved",
            Self::Updating => "updating",
            Self::Deleted => "deleted",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// The item a save session is operating on.
///
/// Owned exclusively by the session controller for one open-to-close UI
/// cycle. `remote_id` is assigned once by the first successful quick save and
/// cleared only by a successful delete.
#[derive(Debug, Clone, Default)]
pub struct SavedItem {
    pub remote_id: Option<String>,
    pub snapshot: PageSnapshot,
    pub state: LifecycleState,
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
