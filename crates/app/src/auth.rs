use dioxus::prelude::*;
use server::firebase::{FirebaseAuth, FirestoreProfiles};
use session::{DashboardRouter, SessionResolver, SessionState};
use shared_types::{ClientConfig, DEFAULT_SUPPORT_EMAIL};
use std::rc::Rc;

use crate::storage::BrowserTokenStore;

pub type AppSession = SessionResolver<FirebaseAuth<BrowserTokenStore>, FirestoreProfiles>;

/// Global authentication state.
///
/// `session` mirrors the resolver's watch channel so components re-render on
/// every transition. Only the resolver writes to it.
#[derive(Clone)]
pub struct AuthState {
    pub session: Signal<SessionState>,
    pub router: DashboardRouter,
    pub support_email: String,
    resolver: Rc<AppSession>,
}

impl AuthState {
    pub fn new(config: &ClientConfig) -> Self {
        let resolver = SessionResolver::new(
            FirebaseAuth::new(config.firebase.clone()).persisted_in(BrowserTokenStore),
            FirestoreProfiles::new(config.firebase.clone()),
        );
        let support_email = if config.support_email.is_empty() {
            DEFAULT_SUPPORT_EMAIL.to_string()
        } else {
            config.support_email.clone()
        };
        Self {
            session: Signal::new(SessionState::Unresolved),
            router: DashboardRouter::new(config.privileged_account_id.clone()),
            support_email,
            resolver: Rc::new(resolver),
        }
    }

    pub fn resolver(&self) -> Rc<AppSession> {
        self.resolver.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.session.read().is_loading()
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// Start the session tasks once: copy resolver transitions into the
/// `session` signal, resolve the persisted session, and follow the
/// provider's change feed.
///
/// Skipped during server rendering so hydration starts from `Unresolved`.
pub fn use_session_sync(auth: AuthState) {
    use_hook(move || {
        if cfg!(feature = "server") {
            return;
        }

        let mut session = auth.session;
        let mut states = auth.resolver.subscribe();
        spawn(async move {
            loop {
                let state = states.borrow_and_update().clone();
                session.set(state);
                if states.changed().await.is_err() {
                    break;
                }
            }
        });

        let resolver = auth.resolver();
        spawn(async move {
            resolver.initialize().await;
            resolver.follow_provider().await;
        });
    });
}
