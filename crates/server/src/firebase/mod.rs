//! Firebase REST adapters for the session resolver.
//!
//! `FirebaseAuth` talks to the Identity Toolkit and Secure Token APIs,
//! `FirestoreProfiles` reads `users/{uid}` profile documents.
//! `TokenStore` keeps the refresh token across reloads.

mod auth;
mod firestore;
mod store;

pub use auth::FirebaseAuth;
pub use firestore::{decode_profile, FirestoreProfiles};
pub use store::{MemoryTokenStore, TokenStore};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Extract the error code from a Google API error body.
///
/// Messages look like `INVALID_PASSWORD` or
/// `TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been disabled`.
pub(crate) fn error_code(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    envelope
        .error
        .message
        .split(|c: char| c == ' ' || c == ':')
        .next()
        .filter(|code| !code.is_empty())
        .map(str::to_string)
}

fn trim_base(url: &str) -> &str {
    url.trim_end_matches('/')
}
