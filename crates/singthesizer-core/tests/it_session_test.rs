//! Integration tests for session bootstrap, login, and 401 interception

use std::sync::Arc;

use mockito::{Matcher, Server};
use singthesizer_core::auth::{MemoryTokenStore, TokenStore};
use singthesizer_core::models::{LoginData, RegisterData};
use singthesizer_core::routes::{resolve, Guarded, Route};
use singthesizer_core::{ApiClient, AuthSession, AuthStatus};

fn session(server: &Server, store: Arc<MemoryTokenStore>) -> AuthSession {
    let api = ApiClient::new(&format!("{}/api", server.url()), store).expect("client");
    AuthSession::new(api)
}

#[tokio::test]
async fn empty_store_resolves_without_network() {
    //* Given
    let mut server = Server::new_async().await;
    let any_call = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let session = session(&server, Arc::new(MemoryTokenStore::new()));

    //* When
    let status = session.initialize().await;

    //* Then
    any_call.assert_async().await;
    assert_eq!(status, AuthStatus::Unauthenticated);
    assert_eq!(
        resolve(status, Route::Home),
        Guarded::Redirect(Route::Login)
    );
}

#[tokio::test]
async fn stored_token_is_validated_once() {
    //* Given
    let mut server = Server::new_async().await;
    let validation = server
        .mock("GET", "/api/projects/")
        .match_header("authorization", "Bearer abc123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;
    let store = Arc::new(MemoryTokenStore::with_token("abc123"));
    let session = session(&server, store.clone());

    //* When
    let first = session.initialize().await;
    let second = session.initialize().await;

    //* Then
    validation.assert_async().await;
    assert_eq!(first, AuthStatus::Authenticated);
    assert_eq!(second, AuthStatus::Authenticated);
    assert_eq!(store.get().as_deref(), Some("abc123"));
}

#[tokio::test]
async fn rejected_token_is_cleared() {
    //* Given
    let mut server = Server::new_async().await;
    let validation = server
        .mock("GET", "/api/projects/")
        .with_status(401)
        .with_body(r#"{"detail": "Invalid token."}"#)
        .expect(1)
        .create_async()
        .await;
    let store = Arc::new(MemoryTokenStore::with_token("expired"));
    let session = session(&server, store.clone());

    //* When
    let status = session.initialize().await;

    //* Then
    validation.assert_async().await;
    assert_eq!(status, AuthStatus::Unauthenticated);
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn server_error_during_validation_also_clears_token() {
    //* Given
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/projects/")
        .with_status(500)
        .create_async()
        .await;
    let store = Arc::new(MemoryTokenStore::with_token("abc123"));
    let session = session(&server, store.clone());

    //* When
    let status = session.initialize().await;

    //* Then
    assert_eq!(status, AuthStatus::Unauthenticated);
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn login_stores_token_and_authenticates_later_requests() {
    //* Given
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/api/auth/login/")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(serde_json::json!({
            "username": "alice",
            "password": "secret"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token": "abc123"}"#)
        .expect(1)
        .create_async()
        .await;
    let projects = server
        .mock("GET", "/api/projects/")
        .match_header("authorization", "Bearer abc123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;
    let store = Arc::new(MemoryTokenStore::new());
    let session = session(&server, store.clone());
    session.initialize().await;

    //* When
    session
        .login(&LoginData::new("alice", "secret"))
        .await
        .expect("login succeeds");
    let listed: Vec<serde_json::Value> = session.api().get("projects/").await.expect("list");

    //* Then
    login.assert_async().await;
    projects.assert_async().await;
    assert!(listed.is_empty());
    assert_eq!(session.status(), AuthStatus::Authenticated);
    assert_eq!(store.get().as_deref(), Some("abc123"));
    assert_eq!(
        resolve(session.status(), Route::Home),
        Guarded::Redirect(Route::Projects)
    );
}

#[tokio::test]
async fn failed_login_leaves_state_unchanged() {
    //* Given
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/auth/login/")
        .with_status(400)
        .with_body(r#"{"non_field_errors": ["Unable to log in with provided credentials."]}"#)
        .create_async()
        .await;
    let store = Arc::new(MemoryTokenStore::new());
    let session = session(&server, store.clone());
    session.initialize().await;

    //* When
    let err = session
        .login(&LoginData::new("alice", "wrong"))
        .await
        .expect_err("login fails");

    //* Then
    assert_eq!(
        singthesizer_core::messages::login_error(&err),
        "Unable to log in with provided credentials."
    );
    assert_eq!(session.status(), AuthStatus::Unauthenticated);
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn login_rejected_with_401_shows_backend_message() {
    //* Given
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/api/auth/login/")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Invalid credentials"}"#)
        .expect(1)
        .create_async()
        .await;
    let store = Arc::new(MemoryTokenStore::new());
    let session = session(&server, store.clone());
    session.initialize().await;

    //* When
    let err = session
        .login(&LoginData::new("alice", "wrong"))
        .await
        .expect_err("login fails");

    //* Then
    login.assert_async().await;
    assert!(err.is_unauthorized());
    assert_eq!(
        singthesizer_core::messages::login_error(&err),
        "Invalid credentials"
    );
    assert_eq!(session.status(), AuthStatus::Unauthenticated);
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn register_stores_token() {
    //* Given
    let mut server = Server::new_async().await;
    let register = server
        .mock("POST", "/api/auth/register/")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "username": "bob",
            "password_confirm": "pa55word!"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token": "fresh"}"#)
        .expect(1)
        .create_async()
        .await;
    let store = Arc::new(MemoryTokenStore::new());
    let session = session(&server, store.clone());
    session.initialize().await;

    //* When
    session
        .register(&RegisterData {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "pa55word!".to_string(),
            password_confirm: "pa55word!".to_string(),
        })
        .await
        .expect("register succeeds");

    //* Then
    register.assert_async().await;
    assert!(session.is_authenticated());
    assert_eq!(store.get().as_deref(), Some("fresh"));
}

#[tokio::test]
async fn mid_session_401_ends_session() {
    //* Given
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/projects/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;
    server
        .mock("DELETE", "/api/projects/42/")
        .with_status(401)
        .create_async()
        .await;
    let store = Arc::new(MemoryTokenStore::with_token("abc123"));
    let session = session(&server, store.clone());
    assert_eq!(session.initialize().await, AuthStatus::Authenticated);
    let mut status_rx = session.subscribe();

    //* When
    let err = session
        .api()
        .delete("projects/42/")
        .await
        .expect_err("delete rejected");

    //* Then
    assert!(err.is_unauthorized());
    assert_eq!(store.get(), None);
    assert!(status_rx.has_changed().unwrap());
    assert_eq!(*status_rx.borrow_and_update(), AuthStatus::Unauthenticated);
    assert_eq!(
        resolve(session.status(), Route::ProjectDetail(42)),
        Guarded::Redirect(Route::Login)
    );
}
