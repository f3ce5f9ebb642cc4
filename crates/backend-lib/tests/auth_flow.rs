// crates/backend-lib/tests/auth_flow.rs
//! Service-level authentication lifecycle tests.
use std::sync::Arc;
use uuid::Uuid;

use backend_lib::auth::{AuthService, DefaultAuth, TokenIssuer};
use backend_lib::error::AppError;
use backend_lib::store::{MemoryStore, UserStore};

const SECRET: &str = "integration-test-secret-integration!";

fn auth_with_store() -> (DefaultAuth, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new_unswept());
    let tokens = Arc::new(TokenIssuer::new(SECRET, 60 * 60 * 24));
    let auth = DefaultAuth::new(store.clone(), tokens);
    (auth, store)
}

#[tokio::test]
async fn test_register_login_authenticate() {
    let (auth, _store) = auth_with_store();

    let user_id = auth
        .register("alice", "alice@x.com", "pw1")
        .await
        .unwrap();

    let outcome = auth.login("alice@x.com", "pw1").await.unwrap();
    assert_eq!(outcome.user_id, user_id);

    auth.authenticate(&outcome.token, user_id).await.unwrap();
}

#[tokio::test]
async fn test_register_trims_and_rejects_duplicates() {
    let (auth, store) = auth_with_store();

    let user_id = auth
        .register("  alice  ", " alice@x.com ", "pw1")
        .await
        .unwrap();

    let stored = store.find_by_id(user_id).await.unwrap().unwrap();
    assert_eq!(stored.username, "alice");
    assert_eq!(stored.email, "alice@x.com");

    let err = auth
        .register("other", "alice@x.com", "pw2")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateUser));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (auth, _store) = auth_with_store();
    auth.register("alice", "alice@x.com", "pw1").await.unwrap();

    let unknown = auth.login("nobody@x.com", "pw1").await.unwrap_err();
    let wrong_pw = auth.login("alice@x.com", "bad").await.unwrap_err();

    assert!(matches!(unknown, AppError::InvalidCredentials));
    assert!(matches!(wrong_pw, AppError::InvalidCredentials));
    assert_eq!(unknown.to_string(), wrong_pw.to_string());
}

#[tokio::test]
async fn test_second_login_invalidates_first_token() {
    let (auth, store) = auth_with_store();
    let user_id = auth.register("alice", "alice@x.com", "pw1").await.unwrap();

    let first = auth.login("alice@x.com", "pw1").await.unwrap();
    let second = auth.login("alice@x.com", "pw1").await.unwrap();
    assert_ne!(first.token, second.token);

    // single active session: only the newest token survives
    let user = store.find_by_id(user_id).await.unwrap().unwrap();
    assert_eq!(user.tokens.len(), 1);

    let err = auth.authenticate(&first.token, user_id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidToken));
    auth.authenticate(&second.token, user_id).await.unwrap();
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let (auth, _store) = auth_with_store();
    let user_id = auth.register("alice", "alice@x.com", "pw1").await.unwrap();
    let outcome = auth.login("alice@x.com", "pw1").await.unwrap();

    auth.logout(&outcome.token).await.unwrap();

    // a logged-out token no longer authenticates
    let err = auth
        .authenticate(&outcome.token, user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidToken));

    // logging out again, or with a token never issued, is a no-op
    auth.logout(&outcome.token).await.unwrap();
    auth.logout("never-issued").await.unwrap();
}

#[tokio::test]
async fn test_authenticate_rejects_foreign_user_id() {
    let (auth, _store) = auth_with_store();
    let alice = auth.register("alice", "alice@x.com", "pw1").await.unwrap();
    let bob = auth.register("bob", "bob@x.com", "pw2").await.unwrap();

    let outcome = auth.login("alice@x.com", "pw1").await.unwrap();
    assert_eq!(outcome.user_id, alice);

    let err = auth.authenticate(&outcome.token, bob).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidToken));

    let err = auth
        .authenticate(&outcome.token, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidToken));
}
