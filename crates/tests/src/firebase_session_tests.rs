use pretty_assertions::assert_eq;
use serde_json::json;
use server::firebase::{FirebaseAuth, FirestoreProfiles, MemoryTokenStore};
use session::{AuthProvider, DashboardRouter, SessionResolver, SessionState};
use shared_types::{AuthError, Credentials, Destination, FirebaseConfig, Role};
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type FirebaseSession = SessionResolver<FirebaseAuth, FirestoreProfiles>;

async fn firebase_session(server: &MockServer) -> FirebaseSession {
    firebase_session_with(server, MemoryTokenStore::new()).await
}

/// Resolver whose refresh token lives in `store`; sharing a store between
/// two resolvers models a page reload.
async fn firebase_session_with(server: &MockServer, store: MemoryTokenStore) -> FirebaseSession {
    let config = FirebaseConfig {
        api_key: "test-key".into(),
        project_id: "buildsite-test".into(),
        auth_base_url: server.uri(),
        token_base_url: server.uri(),
        firestore_base_url: server.uri(),
        ..FirebaseConfig::default()
    };
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "localId": "uid-7",
            "email": "client@buildsite.test",
            "idToken": "id-token-7",
            "refreshToken": "refresh-7",
            "expiresIn": "3600"
        })))
        .mount(server)
        .await;
    SessionResolver::new(
        FirebaseAuth::new(config.clone()).persisted_in(store),
        FirestoreProfiles::new(config),
    )
}

fn creds() -> Credentials {
    Credentials::new("client@buildsite.test", "correct-horse")
}

const DOC_PATH: &str = "/v1/projects/buildsite-test/databases/(default)/documents/users/uid-7";

#[tokio::test]
async fn login_merges_firestore_profile() {
    let server = MockServer::start().await;
    let resolver = firebase_session(&server).await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fields": {
                "role": {"stringValue": "customer"},
                "originalRole": {"stringValue": "admin"},
                "approvalStatus": {"stringValue": "approved"}
            }
        })))
        .mount(&server)
        .await;

    let identity = resolver.login(&creds()).await.unwrap();

    assert_eq!(identity.id, "uid-7");
    assert_eq!(identity.role, Role::Customer);
    assert_eq!(identity.original_role, Some(Role::Admin));
    assert_eq!(
        DashboardRouter::default().resolve(&identity),
        Destination::AdminDashboard
    );
}

#[tokio::test]
async fn login_without_profile_document_is_pending() {
    let server = MockServer::start().await;
    let resolver = firebase_session(&server).await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let identity = resolver.login(&creds()).await.unwrap();

    assert_eq!(
        DashboardRouter::default().resolve(&identity),
        Destination::PendingApproval
    );
}

#[tokio::test]
async fn firestore_outage_during_login_fails_closed() {
    let server = MockServer::start().await;
    let resolver = firebase_session(&server).await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = resolver.login(&creds()).await.unwrap_err();

    assert!(matches!(err, AuthError::ProviderUnavailable(_)));
    assert_eq!(resolver.state(), SessionState::Absent);
    assert_eq!(*resolver.provider().subscribe().borrow(), None);
}

#[tokio::test]
async fn reload_resumes_the_signed_in_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fields": {
                "role": {"stringValue": "customer"},
                "approvalStatus": {"stringValue": "approved"}
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/token"))
        .and(body_string_contains("refresh_token=refresh-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id_token": "id-token-8",
            "refresh_token": "refresh-8",
            "user_id": "uid-7",
            "expires_in": "3600"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:lookup"))
        .and(body_partial_json(json!({"idToken": "id-token-8"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"localId": "uid-7", "email": "client@buildsite.test"}]
        })))
        .mount(&server)
        .await;
    let store = MemoryTokenStore::new();

    let before = firebase_session_with(&server, store.clone()).await;
    before.initialize().await;
    assert_eq!(before.state(), SessionState::Absent);
    before.login(&creds()).await.unwrap();
    drop(before);

    let after = firebase_session_with(&server, store.clone()).await;
    after.initialize().await;

    let identity = after.current_identity().unwrap();
    assert_eq!(identity.id, "uid-7");
    assert_eq!(identity.email, "client@buildsite.test");
    assert_eq!(identity.role, Role::Customer);
    assert_eq!(store.token().as_deref(), Some("refresh-8"));
}

#[tokio::test]
async fn reload_after_logout_starts_signed_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let store = MemoryTokenStore::new();

    let before = firebase_session_with(&server, store.clone()).await;
    before.login(&creds()).await.unwrap();
    before.logout().await;
    drop(before);

    let after = firebase_session_with(&server, store).await;
    after.initialize().await;

    assert_eq!(after.state(), SessionState::Absent);
}
