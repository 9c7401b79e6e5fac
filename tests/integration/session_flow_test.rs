//! Integration tests for login, registration and session restoration.

mod helpers;

use docshare_client::guard::{Access, LOGIN_ROUTE};
use docshare_client::session::Registration;
use docshare_client::{RouteGuard, SessionState};
use docshare_core::error::ErrorKind;
use docshare_core::traits::TokenStore;

#[tokio::test]
async fn test_startup_without_token_is_anonymous() {
    let app = helpers::TestApp::new().await;
    let session = app.session().await;

    assert_eq!(session.state(), SessionState::Anonymous);
    let guard = RouteGuard::new(session.subscribe());
    assert_eq!(
        guard.check(),
        Access::Redirect {
            to: LOGIN_ROUTE.to_string()
        }
    );
}

#[tokio::test]
async fn test_invalid_token_at_startup_is_cleared() {
    let app = helpers::TestApp::new().await;
    let store = app.token_store();
    store.set("expired-token").unwrap();

    let session = app.session().await;

    assert_eq!(session.state(), SessionState::Anonymous);
    assert_eq!(store.get().unwrap(), None);
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_register_then_login_persists_session() {
    let app = helpers::TestApp::new().await;
    let session = app.session().await;

    let registration = Registration::new("Ayşe Demir", "ayse@example.com", "s3cret");
    session.register(&registration).await.unwrap();
    assert_eq!(app.service.account_count(), 1);
    assert_eq!(session.state(), SessionState::Anonymous);

    let user = session.login("ayse@example.com", "s3cret").await.unwrap();
    assert_eq!(user.name, "Ayşe Demir");
    assert!(session.state().is_authenticated());
    assert!(app.token_store().get().unwrap().is_some());

    // A new process with the same store resolves the same user.
    let restored = app.session().await;
    assert_eq!(restored.user(), Some(user.clone()));
    let mut guard = RouteGuard::new(restored.subscribe());
    assert_eq!(guard.require().await.unwrap(), user);
}

#[tokio::test]
async fn test_duplicate_registration_fails() {
    let app = helpers::TestApp::with_account("Ayşe", "ayse@example.com", "pw").await;
    let session = app.session().await;

    let err = session
        .register(&Registration::new("Other", "ayse@example.com", "pw2"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::RegistrationFailed);
    assert_eq!(err.status(), Some(400));
    assert_eq!(app.service.account_count(), 1);
}

#[tokio::test]
async fn test_invalid_registration_sends_nothing() {
    let app = helpers::TestApp::new().await;
    let session = app.session().await;
    let before = app.server.received_requests().await.unwrap().len();

    let err = session
        .register(&Registration::new("", "not-an-email", "pw"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(app.server.received_requests().await.unwrap().len(), before);
}

#[tokio::test]
async fn test_wrong_password_keeps_anonymous() {
    let app = helpers::TestApp::with_account("Ayşe", "ayse@example.com", "pw").await;
    let session = app.session().await;

    let err = session
        .login("ayse@example.com", "wrong")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AuthenticationFailed);
    assert!(err.is_unauthorized());
    assert_eq!(session.state(), SessionState::Anonymous);
    assert_eq!(app.token_store().get().unwrap(), None);
}

#[tokio::test]
async fn test_logout_clears_token_and_redirects() {
    let app = helpers::TestApp::with_account("Ayşe", "ayse@example.com", "pw").await;
    let session = app.session().await;
    session.login("ayse@example.com", "pw").await.unwrap();

    let mut guard = RouteGuard::new(session.subscribe());
    assert!(matches!(guard.check(), Access::Granted(_)));

    let requests_before = app.server.received_requests().await.unwrap().len();
    session.logout();

    assert_eq!(session.state(), SessionState::Anonymous);
    assert_eq!(app.token_store().get().unwrap(), None);
    assert!(matches!(
        guard.changed().await,
        Some(Access::Redirect { .. })
    ));
    assert_eq!(
        app.server.received_requests().await.unwrap().len(),
        requests_before
    );

    let restored = app.session().await;
    assert_eq!(restored.state(), SessionState::Anonymous);
}
