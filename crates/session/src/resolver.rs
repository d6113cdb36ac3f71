use shared_types::{AuthAccount, AuthError, Credentials, Identity, Profile, ProfileError, Role};
use tokio::sync::{watch, Mutex};

use crate::provider::{AuthProvider, ProfileStore};

/// Who is signed in, as seen by every guard.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Initial resolution has not finished.
    #[default]
    Unresolved,
    /// Resolved, nobody signed in.
    Absent,
    Present(Identity),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Unresolved)
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Present(identity) => Some(identity),
            _ => None,
        }
    }

    /// True iff an identity is present and its role is one of `candidates`.
    pub fn has_role(&self, candidates: &[Role]) -> bool {
        self.identity()
            .map(|identity| identity.has_any_role(candidates))
            .unwrap_or(false)
    }

    fn label(&self) -> &'static str {
        match self {
            SessionState::Unresolved => "unresolved",
            SessionState::Absent => "absent",
            SessionState::Present(_) => "present",
        }
    }
}

/// Single source of truth for the signed-in identity.
///
/// Constructed once at application start and shared by reference. Guards
/// observe it through [`SessionResolver::subscribe`] and never mutate it.
pub struct SessionResolver<P, S> {
    provider: P,
    profiles: S,
    state: watch::Sender<SessionState>,
    login_gate: Mutex<()>,
}

impl<P, S> SessionResolver<P, S>
where
    P: AuthProvider,
    S: ProfileStore,
{
    pub fn new(provider: P, profiles: S) -> Self {
        let (state, _) = watch::channel(SessionState::Unresolved);
        Self {
            provider,
            profiles,
            state,
            login_gate: Mutex::new(()),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn profiles(&self) -> &S {
        &self.profiles
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn has_role(&self, candidates: &[Role]) -> bool {
        self.state.borrow().has_role(candidates)
    }

    /// Receiver that wakes on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Resolve the session the provider already holds (app load).
    ///
    /// Only applies while still unresolved; a sign-in that finished first wins.
    #[tracing::instrument(skip(self))]
    pub async fn initialize(&self) {
        let next = match self.provider.current_account().await {
            Ok(Some(account)) => self.resolve_or_absent(&account).await,
            Ok(None) => SessionState::Absent,
            Err(e) => {
                tracing::warn!(error = %e, "Auth provider unavailable during initial resolution");
                SessionState::Absent
            }
        };

        self.state.send_if_modified(|current| {
            if !current.is_loading() {
                return false;
            }
            tracing::debug!(to = next.label(), "Initial session resolved");
            *current = next;
            true
        });
    }

    /// Sign in with email and password.
    ///
    /// A second call while one is pending fails with `LoginInProgress`.
    /// Profile failures leave the session absent.
    #[tracing::instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let _gate = self.login_gate.try_lock().map_err(|_| {
            tracing::warn!("Rejected sign-in while another is pending");
            AuthError::LoginInProgress
        })?;

        let account = self.provider.authenticate(credentials).await?;

        match self.resolve(&account).await {
            Ok(identity) => {
                tracing::info!(
                    user_id = %identity.id,
                    role = %identity.role,
                    approval = identity.approval_status.as_str(),
                    "Signed in"
                );
                self.transition(SessionState::Present(identity.clone()));
                Ok(identity)
            }
            Err(e) => {
                tracing::warn!(user_id = %account.id, error = %e, "Profile unavailable, signing out");
                if let Err(sign_out_err) = self.provider.sign_out().await {
                    tracing::warn!(error = %sign_out_err, "Provider sign-out failed");
                }
                self.transition(SessionState::Absent);
                Err(e.into())
            }
        }
    }

    /// Sign out. Safe to call when nobody is signed in.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) {
        if let Err(e) = self.provider.sign_out().await {
            tracing::warn!(error = %e, "Provider sign-out failed, clearing local session anyway");
        }
        self.transition(SessionState::Absent);
    }

    /// Re-read the profile of the signed-in account, e.g. after an
    /// administrator approved it.
    ///
    /// The result is dropped if the session changed while the profile was
    /// being fetched, so a concurrent logout stays logged out.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self) {
        let Some(current) = self.current_identity() else {
            return;
        };
        let next = match self.provider.current_account().await {
            Ok(Some(account)) if account.id == current.id => self.resolve_or_absent(&account).await,
            Ok(_) => SessionState::Absent,
            Err(e) => {
                tracing::warn!(error = %e, "Auth provider unavailable during refresh");
                SessionState::Absent
            }
        };
        self.transition_from(&SessionState::Present(current), next);
    }

    /// Follow the provider's change feed until the provider is dropped.
    pub async fn follow_provider(&self) {
        let mut accounts = self.provider.subscribe();
        while accounts.changed().await.is_ok() {
            let account = accounts.borrow_and_update().clone();
            self.apply_provider_change(account).await;
        }
    }

    /// Adapt one provider notification into a session transition.
    ///
    /// Holds the sign-in gate while resolving, so a login started meanwhile
    /// is rejected with `LoginInProgress`.
    pub async fn apply_provider_change(&self, account: Option<AuthAccount>) {
        // A pending sign-in resolves its own account.
        let Ok(_gate) = self.login_gate.try_lock() else {
            return;
        };
        match account {
            None => {
                if self.state.borrow().identity().is_some() {
                    tracing::info!("Provider ended the session");
                }
                self.transition(SessionState::Absent);
            }
            Some(account) => {
                let before = self.state();
                if before.identity().is_some_and(|identity| identity.id == account.id) {
                    return;
                }
                let next = self.resolve_or_absent(&account).await;
                self.transition_from(&before, next);
            }
        }
    }

    async fn resolve(&self, account: &AuthAccount) -> Result<Identity, ProfileError> {
        let profile = match self.profiles.fetch_profile(account).await? {
            Some(profile) => profile,
            None => {
                tracing::info!(user_id = %account.id, "No profile document, treating as unvetted");
                Profile::default()
            }
        };
        Ok(Identity::from_parts(account, profile))
    }

    async fn resolve_or_absent(&self, account: &AuthAccount) -> SessionState {
        match self.resolve(account).await {
            Ok(identity) => SessionState::Present(identity),
            Err(e) => {
                tracing::warn!(user_id = %account.id, error = %e, "Profile unavailable, session unresolvable");
                SessionState::Absent
            }
        }
    }

    /// Like [`Self::transition`], but only while the state still equals `expected`.
    fn transition_from(&self, expected: &SessionState, next: SessionState) {
        self.state.send_if_modified(|current| {
            if current != expected {
                tracing::debug!(
                    at = current.label(),
                    dropped = next.label(),
                    "Session changed while resolving, dropping stale result"
                );
                return false;
            }
            if *current == next {
                return false;
            }
            tracing::debug!(from = current.label(), to = next.label(), "Session transition");
            *current = next;
            true
        });
    }

    fn transition(&self, next: SessionState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            tracing::debug!(from = current.label(), to = next.label(), "Session transition");
            *current = next;
            true
        });
    }
}
