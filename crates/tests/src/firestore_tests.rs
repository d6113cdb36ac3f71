use pretty_assertions::assert_eq;
use serde_json::json;
use server::firebase::FirestoreProfiles;
use session::ProfileStore;
use shared_types::{ApprovalStatus, AuthAccount, FirebaseConfig, ProfileError, Role};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOC_PATH: &str = "/v1/projects/buildsite-test/databases/(default)/documents/users/uid-1";

fn store(server: &MockServer) -> FirestoreProfiles {
    FirestoreProfiles::new(FirebaseConfig {
        api_key: "test-key".into(),
        project_id: "buildsite-test".into(),
        firestore_base_url: server.uri(),
        ..FirebaseConfig::default()
    })
}

fn account() -> AuthAccount {
    AuthAccount {
        id: "uid-1".into(),
        email: "office@buildsite.test".into(),
        id_token: "id-token-1".into(),
        refresh_token: "refresh-1".into(),
        expires_at: None,
    }
}

#[tokio::test]
async fn reads_profile_document_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .and(header("authorization", "Bearer id-token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/buildsite-test/databases/(default)/documents/users/uid-1",
            "fields": {
                "role": {"stringValue": "office_admin"},
                "approvalStatus": {"stringValue": "approved"},
                "displayName": {"stringValue": "Morgan"},
                "createdAt": {"timestampValue": "2024-03-01T10:00:00Z"}
            },
            "createTime": "2024-03-01T10:00:00.000000Z",
            "updateTime": "2024-03-02T10:00:00.000000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = store(&server).fetch_profile(&account()).await.unwrap().unwrap();

    assert_eq!(profile.role, Role::OfficeAdmin);
    assert_eq!(profile.approval_status, ApprovalStatus::Approved);
    assert_eq!(profile.display_name.as_deref(), Some("Morgan"));
}

#[tokio::test]
async fn missing_document_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": 404, "message": "Document not found", "status": "NOT_FOUND"}
        })))
        .mount(&server)
        .await;

    assert_eq!(store(&server).fetch_profile(&account()).await.unwrap(), None);
}

#[tokio::test]
async fn permission_denied_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    assert!(matches!(
        store(&server).fetch_profile(&account()).await,
        Err(ProfileError::Unavailable(ref m)) if m.contains("403")
    ));
}

#[tokio::test]
async fn garbage_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    assert!(matches!(
        store(&server).fetch_profile(&account()).await,
        Err(ProfileError::Malformed(_))
    ));
}
