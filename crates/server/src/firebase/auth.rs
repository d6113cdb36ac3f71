use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use session::AuthProvider;
use shared_types::{AuthAccount, AuthError, Credentials, FirebaseConfig};
use tokio::sync::watch;

use super::store::{MemoryTokenStore, TokenStore};
use super::{error_code, trim_base};

/// Refresh the ID token when it expires within this many seconds.
const REFRESH_MARGIN_SECS: i64 = 300;

/// Sign-in failures that mean the email/password pair is wrong.
const CREDENTIAL_ERRORS: &[&str] = &[
    "EMAIL_NOT_FOUND",
    "INVALID_PASSWORD",
    "INVALID_LOGIN_CREDENTIALS",
    "INVALID_EMAIL",
    "MISSING_EMAIL",
    "MISSING_PASSWORD",
    "USER_DISABLED",
];

/// Token-refresh failures that mean the session is over.
const SESSION_ENDED_ERRORS: &[&str] = &[
    "TOKEN_EXPIRED",
    "USER_DISABLED",
    "USER_NOT_FOUND",
    "INVALID_REFRESH_TOKEN",
    "MISSING_REFRESH_TOKEN",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: String,
}

fn expiry(now: DateTime<Utc>, expires_in: &str) -> Option<DateTime<Utc>> {
    expires_in
        .parse::<i64>()
        .ok()
        .map(|secs| now + Duration::seconds(secs))
}

/// Map an Identity Toolkit sign-in failure to an `AuthError`.
pub(crate) fn classify_sign_in_failure(status: u16, body: &str) -> AuthError {
    match error_code(body) {
        Some(code) if CREDENTIAL_ERRORS.contains(&code.as_str()) => AuthError::InvalidCredentials,
        Some(code) => AuthError::unavailable(format!("sign-in rejected ({status}): {code}")),
        None => AuthError::unavailable(format!("sign-in failed with status {status}")),
    }
}

/// Email/password authentication against Firebase Auth.
///
/// Holds the signed-in account in memory and publishes every change on a
/// watch channel. The refresh token goes to a [`TokenStore`] so a reload
/// can resume the session.
pub struct FirebaseAuth<T = MemoryTokenStore> {
    client: reqwest::Client,
    config: FirebaseConfig,
    session: watch::Sender<Option<AuthAccount>>,
    store: T,
}

impl FirebaseAuth {
    pub fn new(config: FirebaseConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: FirebaseConfig) -> Self {
        let (session, _) = watch::channel(None);
        Self {
            client,
            config,
            session,
            store: MemoryTokenStore::new(),
        }
    }
}

impl<T: TokenStore> FirebaseAuth<T> {
    /// Keep the refresh token in `store` instead.
    pub fn persisted_in<U: TokenStore>(self, store: U) -> FirebaseAuth<U> {
        FirebaseAuth {
            client: self.client,
            config: self.config,
            session: self.session,
            store,
        }
    }

    fn sign_in_url(&self) -> String {
        format!(
            "{}/v1/accounts:signInWithPassword",
            trim_base(&self.config.auth_base_url)
        )
    }

    fn lookup_url(&self) -> String {
        format!("{}/v1/accounts:lookup", trim_base(&self.config.auth_base_url))
    }

    fn token_url(&self) -> String {
        format!("{}/v1/token", trim_base(&self.config.token_base_url))
    }

    fn publish(&self, account: Option<AuthAccount>) {
        self.session.send_if_modified(|current| {
            if *current == account {
                return false;
            }
            *current = account;
            true
        });
    }

    /// Exchange the refresh token for a fresh ID token.
    ///
    /// Returns `Ok(None)` and publishes `None` when Firebase reports the
    /// session as ended.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_session(&self) -> Result<Option<AuthAccount>, AuthError> {
        let Some(account) = self.session.borrow().clone() else {
            return Ok(None);
        };

        let Some(refreshed) = self.exchange(account).await? else {
            return Ok(None);
        };
        self.store.save(&refreshed.refresh_token).await;
        self.publish(Some(refreshed.clone()));
        Ok(Some(refreshed))
    }

    /// Resume the session whose refresh token survived a reload.
    ///
    /// A sign-in that completes while this is in flight wins.
    #[tracing::instrument(skip(self))]
    async fn restore(&self) -> Result<Option<AuthAccount>, AuthError> {
        let Some(refresh_token) = self.store.load().await else {
            return Ok(None);
        };
        if !self.config.is_configured() {
            return Ok(None);
        }

        let seed = AuthAccount {
            id: String::new(),
            email: String::new(),
            id_token: String::new(),
            refresh_token,
            expires_at: None,
        };
        let Some(mut account) = self.exchange(seed).await? else {
            return Ok(None);
        };
        account.email = self.lookup_email(&account).await?;

        let mut restored = false;
        self.session.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(account.clone());
            restored = true;
            true
        });
        if !restored {
            return Ok(self.session.borrow().clone());
        }
        self.store.save(&account.refresh_token).await;
        tracing::info!(user_id = %account.id, "Restored Firebase session");
        Ok(Some(account))
    }

    /// Trade `account`'s refresh token at the Secure Token API. `Ok(None)`
    /// means Firebase ended the session; the stored token is dropped and
    /// `None` is published.
    async fn exchange(&self, account: AuthAccount) -> Result<Option<AuthAccount>, AuthError> {
        let response = self
            .client
            .post(self.token_url())
            .query(&[("key", self.config.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", account.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::unavailable(format!("token refresh request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            let body: RefreshResponse = response
                .json()
                .await
                .map_err(|e| AuthError::unavailable(format!("unreadable token response: {e}")))?;
            return Ok(Some(AuthAccount {
                id: if body.user_id.is_empty() {
                    account.id
                } else {
                    body.user_id
                },
                id_token: body.id_token,
                refresh_token: body.refresh_token,
                expires_at: expiry(Utc::now(), &body.expires_in),
                ..account
            }));
        }

        let body = response.text().await.unwrap_or_default();
        match error_code(&body) {
            Some(code) if status.is_client_error() && SESSION_ENDED_ERRORS.contains(&code.as_str()) => {
                tracing::info!(user_id = %account.id, code = %code, "Firebase ended the session");
                self.store.clear().await;
                self.publish(None);
                Ok(None)
            }
            _ => Err(AuthError::unavailable(format!(
                "token refresh failed with status {status}"
            ))),
        }
    }

    /// The token endpoint does not return the email, so ask the account API.
    async fn lookup_email(&self, account: &AuthAccount) -> Result<String, AuthError> {
        let response = self
            .client
            .post(self.lookup_url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&serde_json::json!({ "idToken": account.id_token }))
            .send()
            .await
            .map_err(|e| AuthError::unavailable(format!("account lookup request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::unavailable(format!(
                "account lookup failed with status {status}"
            )));
        }
        let body: LookupResponse = response
            .json()
            .await
            .map_err(|e| AuthError::unavailable(format!("unreadable lookup response: {e}")))?;
        body.users
            .into_iter()
            .find(|user| user.local_id == account.id)
            .map(|user| user.email)
            .ok_or_else(|| AuthError::unavailable("account lookup returned no matching user"))
    }
}

impl<T: TokenStore> AuthProvider for FirebaseAuth<T> {
    #[tracing::instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthAccount, AuthError> {
        if !self.config.is_configured() {
            return Err(AuthError::unavailable("Firebase is not configured"));
        }

        let response = self
            .client
            .post(self.sign_in_url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&serde_json::json!({
                "email": credentials.email,
                "password": credentials.password,
                "returnSecureToken": true,
            }))
            .send()
            .await
            .map_err(|e| AuthError::unavailable(format!("sign-in request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = classify_sign_in_failure(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), error = %err, "Firebase sign-in failed");
            return Err(err);
        }

        let body: SignInResponse = response
            .json()
            .await
            .map_err(|e| AuthError::unavailable(format!("unreadable sign-in response: {e}")))?;

        let account = AuthAccount {
            id: body.local_id,
            email: if body.email.is_empty() {
                credentials.email.clone()
            } else {
                body.email
            },
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_at: expiry(Utc::now(), &body.expires_in),
        };
        self.store.save(&account.refresh_token).await;
        self.publish(Some(account.clone()));
        Ok(account)
    }

    /// The signed-in account, refreshed near expiry. With nobody signed in
    /// this resumes a session from the token store.
    async fn current_account(&self) -> Result<Option<AuthAccount>, AuthError> {
        let current = self.session.borrow().clone();
        match current {
            Some(account) if account.expires_within(Utc::now(), REFRESH_MARGIN_SECS) => {
                self.refresh_session().await
            }
            Some(account) => Ok(Some(account)),
            None => self.restore().await,
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.store.clear().await;
        self.publish(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthAccount>> {
        self.session.subscribe()
    }
}
