use shared_types::{AuthAccount, AuthError, Credentials, Profile, ProfileError};
use tokio::sync::watch;

/// External authentication backend.
///
/// Futures are not required to be `Send`: in the browser the HTTP client
/// futures are tied to the JS event loop.
#[allow(async_fn_in_trait)]
pub trait AuthProvider {
    /// Exchange credentials for an account. Implementations publish the new
    /// account on their `subscribe` channel.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthAccount, AuthError>;

    /// The account the provider currently considers signed in, if any.
    async fn current_account(&self) -> Result<Option<AuthAccount>, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Change feed of the provider's signed-in account. `None` means the
    /// session ended (sign-out, expiry, revocation).
    fn subscribe(&self) -> watch::Receiver<Option<AuthAccount>>;
}

/// Profile documents keyed by account id.
#[allow(async_fn_in_trait)]
pub trait ProfileStore {
    /// `Ok(None)` when the account has no profile document yet.
    async fn fetch_profile(&self, account: &AuthAccount) -> Result<Option<Profile>, ProfileError>;
}
