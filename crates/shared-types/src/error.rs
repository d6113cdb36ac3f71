use serde::{Deserialize, Serialize};
use std::fmt;

/// Failures surfaced to the caller of a sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AuthError {
    /// The provider rejected the email/password pair.
    InvalidCredentials,
    /// Transport failure, provider outage, or the profile could not be loaded.
    ProviderUnavailable(String),
    /// Another sign-in is still in flight for this session.
    LoginInProgress,
}

impl AuthError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        AuthError::ProviderUnavailable(message.into())
    }

    /// Message suitable for display on the login form.
    pub fn friendly_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Invalid email or password.",
            AuthError::ProviderUnavailable(_) => {
                "We couldn't reach the sign-in service. Please try again in a moment."
            }
            AuthError::LoginInProgress => "Already signing you in. Please wait.",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "InvalidCredentials"),
            AuthError::ProviderUnavailable(msg) => write!(f, "ProviderUnavailable: {msg}"),
            AuthError::LoginInProgress => write!(f, "LoginInProgress"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Failures reading a profile document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ProfileError {
    Unavailable(String),
    Malformed(String),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::Unavailable(msg) => write!(f, "profile store unavailable: {msg}"),
            ProfileError::Malformed(msg) => write!(f, "malformed profile: {msg}"),
        }
    }
}

impl std::error::Error for ProfileError {}

impl From<ProfileError> for AuthError {
    fn from(e: ProfileError) -> Self {
        AuthError::ProviderUnavailable(e.to_string())
    }
}
