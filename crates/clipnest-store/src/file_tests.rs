use super::*;
use clipnest_protocols::UserProfile;
use tempfile::TempDir;

#[tokio::test]
async fn test_get_on_fresh_store_is_none() {
    let dir = TempDir::new().unwrap();
    let store = FileUserStore::new(dir.path());
    assert!(store.get_user().await.unwrap().is_none());
}

#[tokio::test]
async fn test_set_then_get_roundtrip() {
    let dir = TempDir::new().unwrap();
    let store = FileUserStore::new(dir.path());

    let profile = UserProfile::new("u-1", "tok-1").with_name("Ada");
    store.set_user(profile.clone()).await.unwrap();

    let loaded = store.get_user().await.unwrap().unwrap();
    assert_eq!(loaded, profile);
}

#[tokio::test]
async fn test_set_replaces_previous_slot() {
    let dir = TempDir::new().unwrap();
    let store = FileUserStore::new(dir.path());

    store.set_user(UserProfile::new("u-1", "old")).await.unwrap();
    store.set_user(UserProfile::new("u-1", "new")).await.unwrap();

    let loaded = store.get_user().await.unwrap().unwrap();
    assert_eq!(loaded.token(), "new");
}

#[tokio::test]
async fn test_clear_removes_profile() {
    let dir = TempDir::new().unwrap();
    let store = FileUserStore::new(dir.path());

    store.set_user(UserProfile::new("u-1", "tok")).await.unwrap();
    store.clear_user().await.unwrap();
    assert!(store.get_user().await.unwrap().is_none());
}

#[tokio::test]
async fn test_clear_on_empty_store_is_ok() {
    let dir = TempDir::new().unwrap();
    let store = FileUserStore::new(dir.path());
    store.clear_user().await.unwrap();
}

#[tokio::test]
async fn test_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = FileUserStore::new(dir.path());
        store.set_user(UserProfile::new("u-1", "tok")).await.unwrap();
    }
    let reopened = FileUserStore::new(dir.path());
    assert!(reopened.get_user().await.unwrap().is_some());
}

#[tokio::test]
async fn test_corrupt_file_surfaces_serialization_error() {
    let dir = TempDir::new().unwrap();
    let store = FileUserStore::new(dir.path());
    std::fs::write(store.path(), "not json").unwrap();

    let err = store.get_user().await.unwrap_err();
    assert!(matches!(err, clipnest_protocols::StoreError::Serialization(_)));
}

#[tokio::test]
async fn test_no_temp_file_left_behind() {
    let dir = TempDir::new().unwrap();
    let store = FileUserStore::new(dir.path());
    store.set_user(UserProfile::new("u", "t")).await.unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
