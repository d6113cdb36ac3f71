use serde::{Deserialize, Serialize};

pub const DEFAULT_AUTH_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_TOKEN_BASE_URL: &str = "https://securetoken.googleapis.com";
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";
pub const DEFAULT_PROFILE_COLLECTION: &str = "users";
pub const DEFAULT_SUPPORT_EMAIL: &str = "support@example.com";

/// Firebase project settings. The web API key is not a secret; it ships to
/// the browser the same way the Firebase JS SDK config does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FirebaseConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,
    #[serde(default = "default_token_base_url")]
    pub token_base_url: String,
    #[serde(default = "default_firestore_base_url")]
    pub firestore_base_url: String,
    #[serde(default = "default_profile_collection")]
    pub profile_collection: String,
}

impl FirebaseConfig {
    /// True once both the API key and the project id are set.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.project_id.is_empty()
    }
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            project_id: String::new(),
            auth_base_url: default_auth_base_url(),
            token_base_url: default_token_base_url(),
            firestore_base_url: default_firestore_base_url(),
            profile_collection: default_profile_collection(),
        }
    }
}

fn default_auth_base_url() -> String {
    DEFAULT_AUTH_BASE_URL.to_string()
}

fn default_token_base_url() -> String {
    DEFAULT_TOKEN_BASE_URL.to_string()
}

fn default_firestore_base_url() -> String {
    DEFAULT_FIRESTORE_BASE_URL.to_string()
}

fn default_profile_collection() -> String {
    DEFAULT_PROFILE_COLLECTION.to_string()
}

/// Access-control overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AccessConfig {
    /// Account id that always lands on the admin dashboard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileged_account_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupportConfig {
    #[serde(default = "default_support_email")]
    pub email: String,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            email: default_support_email(),
        }
    }
}

fn default_support_email() -> String {
    DEFAULT_SUPPORT_EMAIL.to_string()
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub firebase: FirebaseConfig,
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub support: SupportConfig,
}

impl AppConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            firebase: self.firebase.clone(),
            privileged_account_id: self.access.privileged_account_id.clone(),
            support_email: self.support.email.clone(),
        }
    }
}

/// Subset of the configuration delivered to the browser.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub firebase: FirebaseConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileged_account_id: Option<String>,
    #[serde(default)]
    pub support_email: String,
}
