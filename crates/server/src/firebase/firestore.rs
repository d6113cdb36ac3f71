use serde_json::Value;
use session::ProfileStore;
use shared_types::{ApprovalStatus, AuthAccount, FirebaseConfig, Profile, ProfileError, Role};

use super::trim_base;

/// Read a string field from a Firestore document's `fields` map.
///
/// Absent and `nullValue` fields are `None`; any other value type is malformed.
fn string_field(fields: &serde_json::Map<String, Value>, name: &str) -> Result<Option<String>, ProfileError> {
    let Some(value) = fields.get(name) else {
        return Ok(None);
    };
    if let Some(s) = value.get("stringValue").and_then(Value::as_str) {
        return Ok(Some(s.to_string()));
    }
    if value.get("nullValue").is_some() {
        return Ok(None);
    }
    Err(ProfileError::Malformed(format!("field `{name}` is not a string")))
}

/// Decode a Firestore REST document into a profile.
pub fn decode_profile(document: &Value) -> Result<Profile, ProfileError> {
    let empty = serde_json::Map::new();
    let fields = match document.get("fields") {
        Some(Value::Object(map)) => map,
        Some(_) => return Err(ProfileError::Malformed("`fields` is not an object".into())),
        None => &empty,
    };

    let defaults = Profile::default();
    Ok(Profile {
        role: string_field(fields, "role")?
            .map(|r| Role::parse(&r))
            .unwrap_or(defaults.role),
        approval_status: string_field(fields, "approvalStatus")?
            .map(|s| ApprovalStatus::from_str_or_denied(&s))
            .unwrap_or(defaults.approval_status),
        original_role: string_field(fields, "originalRole")?
            .filter(|r| !r.is_empty())
            .map(|r| Role::parse(&r)),
        display_name: string_field(fields, "displayName")?,
    })
}

/// Profile documents in Firestore, one per account under `{collection}/{uid}`.
pub struct FirestoreProfiles {
    client: reqwest::Client,
    config: FirebaseConfig,
}

impl FirestoreProfiles {
    pub fn new(config: FirebaseConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: FirebaseConfig) -> Self {
        Self { client, config }
    }

    fn document_url(&self, account_id: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}/{}",
            trim_base(&self.config.firestore_base_url),
            self.config.project_id,
            self.config.profile_collection,
            urlencoding::encode(account_id)
        )
    }
}

impl ProfileStore for FirestoreProfiles {
    #[tracing::instrument(skip(self, account), fields(user_id = %account.id))]
    async fn fetch_profile(&self, account: &AuthAccount) -> Result<Option<Profile>, ProfileError> {
        let mut request = self.client.get(self.document_url(&account.id));
        if !account.id_token.is_empty() {
            request = request.bearer_auth(&account.id_token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProfileError::Unavailable(format!("profile request failed: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ProfileError::Unavailable(format!(
                "profile request failed with status {status}"
            )));
        }

        let document: Value = response
            .json()
            .await
            .map_err(|e| ProfileError::Malformed(format!("unreadable profile document: {e}")))?;
        decode_profile(&document).map(Some)
    }
}
