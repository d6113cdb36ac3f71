use shared_types::{ApprovalStatus, Destination, Role};
use tokio::sync::watch;

use crate::navigation::Navigator;
use crate::resolver::SessionState;

/// Requirements a protected page places on the signed-in identity.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardConfig {
    allowed_roles: Option<Vec<Role>>,
    require_approval: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            allowed_roles: None,
            require_approval: true,
        }
    }
}

impl GuardConfig {
    /// Any signed-in, approved identity.
    pub fn any_role() -> Self {
        Self::default()
    }

    /// Restrict to the given roles. Allowing `OfficeAdmin` also admits the
    /// legacy `Admin` spelling.
    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut allowed: Vec<Role> = Vec::new();
        for role in roles {
            if role == Role::OfficeAdmin && !allowed.contains(&Role::Admin) {
                allowed.push(Role::Admin);
            }
            if !allowed.contains(&role) {
                allowed.push(role);
            }
        }
        Self {
            allowed_roles: Some(allowed),
            require_approval: true,
        }
    }

    pub fn require_approval(mut self, required: bool) -> Self {
        self.require_approval = required;
        self
    }

    pub fn allowed_roles(&self) -> Option<&[Role]> {
        self.allowed_roles.as_deref()
    }

    pub fn requires_approval(&self) -> bool {
        self.require_approval
    }
}

/// Why the access-denied view is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// An administrator rejected the account.
    AccountDenied,
    /// Signed in and approved, but the page is for other roles.
    RoleNotPermitted,
}

impl DenialReason {
    pub fn title(&self) -> &'static str {
        match self {
            DenialReason::AccountDenied => "Account not approved",
            DenialReason::RoleNotPermitted => "Access denied",
        }
    }

    pub fn message(&self, support_email: &str) -> String {
        match self {
            DenialReason::AccountDenied => format!(
                "Your account request was not approved. Contact {support_email} if you think this is a mistake."
            ),
            DenialReason::RoleNotPermitted => {
                "You don't have permission to view this page.".to_string()
            }
        }
    }
}

/// Outcome of one guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Loading,
    Redirect(Destination),
    Deny(DenialReason),
    Render,
}

/// Decide what a protected page shows. Steps short-circuit in order:
/// loading, signed out, approval, role.
pub fn evaluate(state: &SessionState, config: &GuardConfig) -> GuardDecision {
    let identity = match state {
        SessionState::Unresolved => return GuardDecision::Loading,
        SessionState::Absent => return GuardDecision::Redirect(Destination::Login),
        SessionState::Present(identity) => identity,
    };

    if config.require_approval {
        match identity.approval_status {
            ApprovalStatus::Approved => {}
            ApprovalStatus::Pending => return GuardDecision::Redirect(Destination::PendingApproval),
            ApprovalStatus::Denied => return GuardDecision::Deny(DenialReason::AccountDenied),
        }
    }

    if let Some(allowed) = config.allowed_roles() {
        if !state.has_role(allowed) {
            return GuardDecision::Deny(DenialReason::RoleNotPermitted);
        }
    }

    GuardDecision::Render
}

/// Stateful wrapper around [`evaluate`] that issues each redirect once per
/// resolved state.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    config: GuardConfig,
    redirected_for: Option<SessionState>,
}

impl RouteGuard {
    pub fn new(config: GuardConfig) -> Self {
        Self {
            config,
            redirected_for: None,
        }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Evaluate `state`, navigating if the decision is a redirect that has
    /// not already been issued for this exact state.
    pub fn observe<N>(&mut self, state: &SessionState, navigator: &N) -> GuardDecision
    where
        N: Navigator + ?Sized,
    {
        let decision = evaluate(state, &self.config);
        match decision {
            GuardDecision::Redirect(destination) => {
                if self.redirected_for.as_ref() != Some(state) {
                    tracing::debug!(to = destination.path(), "Guard redirect");
                    navigator.navigate(destination.path());
                    self.redirected_for = Some(state.clone());
                }
            }
            GuardDecision::Deny(reason) => {
                tracing::info!(
                    reason = reason.title(),
                    user_id = state.identity().map(|i| i.id.as_str()).unwrap_or(""),
                    "Guard denied access"
                );
                self.redirected_for = None;
            }
            GuardDecision::Loading | GuardDecision::Render => {
                self.redirected_for = None;
            }
        }
        decision
    }

    /// Re-evaluate on every session transition until the resolver is dropped.
    pub async fn watch<N, F>(
        mut self,
        mut states: watch::Receiver<SessionState>,
        navigator: N,
        mut on_decision: F,
    ) where
        N: Navigator,
        F: FnMut(GuardDecision),
    {
        loop {
            let state = states.borrow_and_update().clone();
            on_decision(self.observe(&state, &navigator));
            if states.changed().await.is_err() {
                break;
            }
        }
    }
}
