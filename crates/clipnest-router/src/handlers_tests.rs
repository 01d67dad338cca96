use std::sync::Arc;

use async_trait::async_trait;
use clipnest_protocols::{
    AuthAck, ContextMessage, CookieJar, CredentialResponse, ProxyExecutor, ProxyOutcome,
    ProxyRequest, StoreError, UserProfile, UserStore,
};
use parking_lot::RwLock;
use serde_json::json;

use super::*;

#[derive(Default)]
struct FakeStore {
    user: RwLock<Option<UserProfile>>,
    fail_writes: bool,
}

#[async_trait]
impl UserStore for FakeStore {
    async fn get_user(&self) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.user.read().clone())
    }

    async fn set_user(&self, profile: UserProfile) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Io(std::io::Error::other("disk full")));
        }
        *self.user.write() = Some(profile);
        Ok(())
    }

    async fn clear_user(&self) -> Result<(), StoreError> {
        *self.user.write() = None;
        Ok(())
    }
}

struct FakeJar(Option<String>);

#[async_trait]
impl CookieJar for FakeJar {
    async fn session_cookie(&self) -> Option<String> {
        self.0.clone()
    }
}

struct FakeExecutor(ProxyOutcome);

#[async_trait]
impl ProxyExecutor for FakeExecutor {
    async fn execute(&self, _request: ProxyRequest) -> ProxyOutcome {
        self.0.clone()
    }
}

#[tokio::test]
async fn test_credential_relay_with_cookie_and_profile() {
    let store = Arc::new(FakeStore::default());
    store.set_user(UserProfile::new("u-1", "tok")).await.unwrap();
    let handler = CredentialHandler::new(Arc::new(FakeJar(Some("sess".to_string()))), store);

    let value = handler
        .handle(ContextMessage::GetSessionCredential)
        .await
        .unwrap();
    let resp: CredentialResponse = serde_json::from_value(value).unwrap();
    assert_eq!(resp.credential.unwrap().token, "tok");
}

#[tokio::test]
async fn test_credential_relay_without_cookie_is_null() {
    let store = Arc::new(FakeStore::default());
    store.set_user(UserProfile::new("u-1", "tok")).await.unwrap();
    let handler = CredentialHandler::new(Arc::new(FakeJar(None)), store);

    let value = handler
        .handle(ContextMessage::GetSessionCredential)
        .await
        .unwrap();
    let resp: CredentialResponse = serde_json::from_value(value).unwrap();
    assert!(resp.credential.is_none());
}

#[tokio::test]
async fn test_credential_relay_cookie_without_profile_is_null() {
    let handler = CredentialHandler::new(
        Arc::new(FakeJar(Some("sess".to_string()))),
        Arc::new(FakeStore::default()),
    );

    let value = handler
        .handle(ContextMessage::GetSessionCredential)
        .await
        .unwrap();
    let resp: CredentialResponse = serde_json::from_value(value).unwrap();
    assert!(resp.credential.is_none());
}

#[tokio::test]
async fn test_proxy_relay_success_payload() {
    let handler = ProxyHandler::new(Arc::new(FakeExecutor(ProxyOutcome::ok(
        json!({"data": {"id": "item-1"}}),
    ))));

    let value = handler
        .handle(ContextMessage::ProxyApiRequest(ProxyRequest::get(
            "https://a.com/api/v3/items",
        )))
        .await
        .unwrap();
    let outcome: ProxyOutcome = serde_json::from_value(value).unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.data.unwrap()["data"]["id"], "item-1");
}

#[tokio::test]
async fn test_proxy_relay_failure_is_payload_not_transport_error() {
    let handler = ProxyHandler::new(Arc::new(FakeExecutor(ProxyOutcome::failed("502 Bad Gateway"))));

    let value = handler
        .handle(ContextMessage::ProxyApiRequest(ProxyRequest::get(
            "https://a.com",
        )))
        .await
        .unwrap();
    let outcome: ProxyOutcome = serde_json::from_value(value).unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("502 Bad Gateway"));
}

#[tokio::test]
async fn test_proxy_relay_rejects_wrong_kind() {
    let handler = ProxyHandler::new(Arc::new(FakeExecutor(ProxyOutcome::ok(json!(null)))));
    assert!(handler.handle(ContextMessage::ToggleSaveUi).await.is_err());
}

#[tokio::test]
async fn test_auth_updated_persists_profile() {
    let store = Arc::new(FakeStore::default());
    let handler = AuthUpdatedHandler::new(store.clone());

    let value = handler
        .handle(ContextMessage::AuthUpdated {
            user: UserProfile::new("u-7", "tok-7"),
        })
        .await
        .unwrap();
    let ack: AuthAck = serde_json::from_value(value).unwrap();
    assert!(ack.success);
    assert_eq!(store.get_user().await.unwrap().unwrap().credential.id, "u-7");
}

#[tokio::test]
async fn test_auth_updated_write_failure_acks_with_error() {
    let store = Arc::new(FakeStore {
        user: RwLock::new(None),
        fail_writes: true,
    });
    let handler = AuthUpdatedHandler::new(store);

    let value = handler
        .handle(ContextMessage::AuthUpdated {
            user: UserProfile::new("u", "t"),
        })
        .await
        .unwrap();
    let ack: AuthAck = serde_json::from_value(value).unwrap();
    assert!(!ack.success);
    assert!(ack.error.unwrap().contains("disk full"));
}
