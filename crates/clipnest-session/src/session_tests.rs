use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use clipnest_extract::PageDocument;
use clipnest_protocols::{ApiError, CreateItem, PageSnapshot, RemoteApi, UserProfile};
use parking_lot::Mutex;

use super::*;

#[derive(Default)]
struct FakeApi {
    creates: AtomicUsize,
    updates: AtomicUsize,
    deletes: AtomicUsize,
    fail_create: bool,
    fail_update: bool,
    fail_delete: bool,
    last_update: Mutex<Option<PageSnapshot>>,
}

#[async_trait]
impl RemoteApi for FakeApi {
    async fn create_item(&self, _token: &str, _item: &CreateItem) -> Result<String, ApiError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(ApiError::RequestFailed("503 Service Unavailable".to_string()));
        }
        Ok("item-42".to_string())
    }

    async fn update_item(
        &self,
        _token: &str,
        _item_id: &str,
        snapshot: &PageSnapshot,
    ) -> Result<(), ApiError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.fail_update {
            return Err(ApiError::RequestFailed("update rejected".to_string()));
        }
        *self.last_update.lock() = Some(snapshot.clone());
        Ok(())
    }

    async fn delete_items(&self, _token: &str, _item_ids: &[String]) -> Result<(), ApiError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete {
            return Err(ApiError::RequestFailed("delete rejected".to_string()));
        }
        Ok(())
    }
}

fn document() -> PageDocument {
    PageDocument::new("https://example.com/post")
        .with_title("A Post")
        .with_meta_name("description", "All about posts")
        .with_meta_property("og:image", "/cover.png")
        .with_link("icon", "/favicon.ico")
}

fn session(api: &Arc<FakeApi>) -> SaveSession {
    SaveSession::new(api.clone(), UserProfile::new("u-1", "tok-1"))
}

#[tokio::test]
async fn test_start_quick_saves_then_enriches() {
    let api = Arc::new(FakeApi::default());
    let mut session = session(&api);

    session.start(&document()).await.unwrap();

    assert_eq!(api.creates.load(Ordering::SeqCst), 1);
    assert_eq!(api.updates.load(Ordering::SeqCst), 1);
    assert_eq!(session.state(), LifecycleState::Saved);
    assert_eq!(session.remote_id(), Some("item-42"));
    assert!(session.last_error().is_none());

    let enriched = api.last_update.lock().clone().unwrap();
    assert_eq!(enriched.title, "A Post");
    assert_eq!(enriched.image, "https://example.com/cover.png");
    assert_eq!(enriched.favicon, "https://example.com/favicon.ico");
    assert_eq!(enriched.source_url, "https://example.com/post");
}

#[tokio::test]
async fn test_non_http_page_issues_no_remote_calls() {
    let api = Arc::new(FakeApi::default());
    let mut session = session(&api);

    let err = session
        .start(&PageDocument::new("chrome://settings"))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Extraction(_)));
    assert_eq!(api.creates.load(Ordering::SeqCst), 0);
    assert_eq!(api.updates.load(Ordering::SeqCst), 0);
    assert_eq!(session.state(), LifecycleState::Idle);
}

#[tokio::test]
async fn test_quick_save_failure_is_terminal_and_skips_enrichment() {
    let api = Arc::new(FakeApi {
        fail_create: true,
        ..FakeApi::default()
    });
    let mut session = session(&api);

    let err = session.start(&document()).await.unwrap_err();

    assert!(matches!(err, SessionError::Remote(_)));
    assert_eq!(session.state(), LifecycleState::Error);
    assert!(session.remote_id().is_none());
    assert_eq!(api.updates.load(Ordering::SeqCst), 0);
    assert!(session.last_error().unwrap().contains("503"));
}

#[tokio::test]
async fn test_enrichment_failure_keeps_quick_save() {
    let api = Arc::new(FakeApi {
        fail_update: true,
        ..FakeApi::default()
    });
    let mut session = session(&api);

    // start succeeds: enrichment failure is non-fatal.
    session.start(&document()).await.unwrap();

    assert_eq!(session.state(), LifecycleState::Saved);
    assert_eq!(session.remote_id(), Some("item-42"));
    assert!(session.last_error().unwrap().contains("update rejected"));
}

#[tokio::test]
async fn test_restart_is_a_no_op() {
    let api = Arc::new(FakeApi::default());
    let mut session = session(&api);

    session.start(&document()).await.unwrap();
    session.start(&document()).await.unwrap();

    // Re-trigger re-opens the UI without a second save flow.
    assert_eq!(api.creates.load(Ordering::SeqCst), 1);
    assert_eq!(api.updates.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_update_before_quick_save_is_rejected_locally() {
    let api = Arc::new(FakeApi::default());
    let mut session = session(&api);

    let err = session.update().await.unwrap_err();

    assert!(matches!(err, SessionError::NoActiveItem));
    assert_eq!(api.updates.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_delete_before_quick_save_is_rejected_locally() {
    let api = Arc::new(FakeApi::default());
    let mut session = session(&api);

    let err = session.delete().await.unwrap_err();

    assert!(matches!(err, SessionError::NoActiveItem));
    assert_eq!(api.deletes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_user_edit_then_update_sends_edited_snapshot() {
    let api = Arc::new(FakeApi::default());
    let mut session = session(&api);
    session.start(&document()).await.unwrap();

    session.edit_title("My Title");
    session.edit_description("My notes");
    session.update().await.unwrap();

    let sent = api.last_update.lock().clone().unwrap();
    assert_eq!(sent.title, "My Title");
    assert_eq!(sent.description, "My notes");
    // Unedited fields ride along unchanged.
    assert_eq!(sent.image, "https://example.com/cover.png");
    assert_eq!(session.state(), LifecycleState::Saved);
}

#[tokio::test]
async fn test_repeated_update_is_idempotent() {
    let api = Arc::new(FakeApi::default());
    let mut session = session(&api);
    session.start(&document()).await.unwrap();

    session.update().await.unwrap();
    session.update().await.unwrap();

    assert_eq!(session.state(), LifecycleState::Saved);
    assert_eq!(session.remote_id(), Some("item-42"));
}

#[tokio::test]
async fn test_delete_clears_id_and_reports_display_window() {
    let api = Arc::new(FakeApi::default());
    let mut session = session(&api);
    session.start(&document()).await.unwrap();

    let window = session.delete().await.unwrap();

    assert_eq!(window, DELETED_DISPLAY_WINDOW);
    assert_eq!(session.state(), LifecycleState::Deleted);
    assert!(session.remote_id().is_none());

    // A second delete has nothing to act on and reaches no remote.
    let err = session.delete().await.unwrap_err();
    assert!(matches!(err, SessionError::NoActiveItem));
    assert_eq!(api.deletes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_delete_failure_keeps_item_alive() {
    let api = Arc::new(FakeApi {
        fail_delete: true,
        ..FakeApi::default()
    });
    let mut session = session(&api);
    session.start(&document()).await.unwrap();

    let err = session.delete().await.unwrap_err();

    assert!(matches!(err, SessionError::Remote(_)));
    assert_eq!(session.remote_id(), Some("item-42"));
    assert_eq!(session.state(), LifecycleState::Saved);
}

#[tokio::test]
async fn test_update_failure_surfaces_but_state_recovers() {
    let api = Arc::new(FakeApi {
        fail_update: true,
        ..FakeApi::default()
    });
    let mut session = session(&api);
    // Quick save succeeds; the enrichment update fails non-fatally.
    session.start(&document()).await.unwrap();

    let err = session.update().await.unwrap_err();
    assert!(matches!(err, SessionError::Remote(_)));
    assert_eq!(session.state(), LifecycleState::Saved);
    assert!(session.last_error().is_some());
}
