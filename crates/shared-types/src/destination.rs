use serde::{Deserialize, Serialize};
use std::fmt;

/// Named navigation targets used by the route guard and the dashboard router.
///
/// The access-denied view is rendered in place and has no destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    Login,
    PendingApproval,
    AdminDashboard,
    CustomerDashboard,
    EmployeeDashboard,
    FieldStaffDashboard,
}

impl Destination {
    pub const ALL: [Destination; 6] = [
        Destination::Login,
        Destination::PendingApproval,
        Destination::AdminDashboard,
        Destination::CustomerDashboard,
        Destination::EmployeeDashboard,
        Destination::FieldStaffDashboard,
    ];

    pub const fn path(&self) -> &'static str {
        match self {
            Destination::Login => "/login",
            Destination::PendingApproval => "/pending-approval",
            Destination::AdminDashboard => "/dashboard/admin",
            Destination::CustomerDashboard => "/dashboard/customer",
            Destination::EmployeeDashboard => "/dashboard/employee",
            Destination::FieldStaffDashboard => "/dashboard/field-staff",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        Self::ALL.into_iter().find(|d| d.path() == trimmed)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
