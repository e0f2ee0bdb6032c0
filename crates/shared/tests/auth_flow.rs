use shared::{
    abstract_trait::{AuthServiceTrait, DynHashing, DynKeyValueStore},
    config::Hashing,
    di::ProductBackend,
    domain::requests::{LoginRequest, RegisterRequest},
    errors::ServiceError,
    state::AppState,
    storage::{FileStore, MemoryStore},
};
use std::{path::Path, sync::Arc};
use tempfile::TempDir;

fn hashing() -> DynHashing {
    Arc::new(Hashing::new(4))
}

async fn open(path: &Path) -> AppState {
    let store = Arc::new(FileStore::new(path)) as DynKeyValueStore;
    AppState::with_store(store, ProductBackend::Local, hashing()).await
}

#[tokio::test]
async fn session_outlives_the_process_until_sign_out() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    let state = open(&path).await;
    let auth = &state.di_container.auth_service;
    let session = auth
        .sign_up(&RegisterRequest::new(" tomek@example.com ", "haslo123"))
        .await
        .unwrap();
    assert_eq!(session.email, "tomek@example.com");

    let state = open(&path).await;
    let auth = &state.di_container.auth_service;
    assert_eq!(auth.current_session().await.unwrap(), Some(session.clone()));

    auth.sign_out().await.unwrap();
    assert_eq!(auth.current_session().await.unwrap(), None);

    let again = auth
        .sign_in(&LoginRequest::new("tomek@example.com", "haslo123"))
        .await
        .unwrap();
    assert_eq!(again.uid, session.uid);
}

#[tokio::test]
async fn failed_sign_in_leaves_nobody_signed_in() {
    let store = Arc::new(MemoryStore::new()) as DynKeyValueStore;
    let state = AppState::with_store(store, ProductBackend::Local, hashing()).await;
    let auth = &state.di_container.auth_service;

    auth.sign_up(&RegisterRequest::new("ania@example.com", "tajne99"))
        .await
        .unwrap();
    auth.sign_out().await.unwrap();

    let err = auth
        .sign_in(&LoginRequest::new("ania@example.com", "tajne00"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidCredentials));
    assert!(auth.current_session().await.unwrap().is_none());
}

#[tokio::test]
async fn malformed_email_is_rejected_on_sign_up() {
    let store = Arc::new(MemoryStore::new()) as DynKeyValueStore;
    let state = AppState::with_store(store, ProductBackend::Local, hashing()).await;

    let err = state
        .di_container
        .auth_service
        .sign_up(&RegisterRequest::new("not-an-email", "haslo123"))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(err.field_errors().unwrap().contains_key("email"));
}
