use shared_types::{ApprovalStatus, Destination, Identity, Role};

use crate::navigation::Navigator;
use crate::resolver::SessionState;

/// Account id that always lands on the admin dashboard, regardless of the
/// role stored on its profile. Deployments override it with
/// `[access] privileged_account_id`.
pub const PRIVILEGED_ACCOUNT_ID: &str = "office-owner";

/// One-shot post-login routing.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRouter {
    privileged_account_id: String,
}

impl Default for DashboardRouter {
    fn default() -> Self {
        Self {
            privileged_account_id: PRIVILEGED_ACCOUNT_ID.to_string(),
        }
    }
}

impl DashboardRouter {
    pub fn new(privileged_account_id: Option<String>) -> Self {
        match privileged_account_id {
            Some(id) if !id.is_empty() => Self {
                privileged_account_id: id,
            },
            _ => Self::default(),
        }
    }

    pub fn privileged_account_id(&self) -> &str {
        &self.privileged_account_id
    }

    /// Home destination for `identity`. First matching rule wins.
    pub fn resolve(&self, identity: &Identity) -> Destination {
        if identity.role.is_admin()
            || identity.original_role == Some(Role::Admin)
            || identity.id == self.privileged_account_id
        {
            return Destination::AdminDashboard;
        }
        match identity.role {
            Role::Customer => Destination::CustomerDashboard,
            Role::Employee => Destination::EmployeeDashboard,
            Role::FieldStaff => Destination::FieldStaffDashboard,
            _ if identity.approval_status == ApprovalStatus::Pending => {
                Destination::PendingApproval
            }
            _ => Destination::CustomerDashboard,
        }
    }

    /// Navigate to the landing page for `state`. Returns the destination, or
    /// `None` while the session is still resolving.
    pub fn route<N>(&self, state: &SessionState, navigator: &N) -> Option<Destination>
    where
        N: Navigator + ?Sized,
    {
        let destination = match state {
            SessionState::Unresolved => return None,
            SessionState::Absent => Destination::Login,
            SessionState::Present(identity) => self.resolve(identity),
        };
        tracing::debug!(to = destination.path(), "Dashboard route");
        navigator.navigate(destination.path());
        Some(destination)
    }
}
