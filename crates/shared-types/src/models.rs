use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role controlling which dashboards and views a user can reach.
///
/// - `OfficeAdmin`: back-office staff with full access.
/// - `Admin`: legacy spelling of `OfficeAdmin`, still present on older profiles.
/// - `Customer`: clients viewing their own jobs, estimates and invoices.
/// - `Employee`: office employees (timesheets, payroll).
/// - `FieldStaff`: crews working job sites.
/// - `Unrecognized`: any other stored value. Never matches a role check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    OfficeAdmin,
    Admin,
    Customer,
    Employee,
    FieldStaff,
    Unrecognized(String),
}

impl Role {
    /// Parse a stored role string. Unknown values are kept verbatim.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "office_admin" => Role::OfficeAdmin,
            "admin" => Role::Admin,
            "customer" => Role::Customer,
            "employee" => Role::Employee,
            "field_staff" => Role::FieldStaff,
            _ => Role::Unrecognized(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::OfficeAdmin => "office_admin",
            Role::Admin => "admin",
            Role::Customer => "customer",
            Role::Employee => "employee",
            Role::FieldStaff => "field_staff",
            Role::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Role::Unrecognized(_))
    }

    /// True for `OfficeAdmin` and its legacy alias `Admin`.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::OfficeAdmin | Role::Admin)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::parse(&s)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an administrator has vetted the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl ApprovalStatus {
    /// Parse a stored status. Values outside the closed set are treated as
    /// `Denied` so a corrupted profile can never pass an approval check.
    pub fn from_str_or_denied(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pending" => ApprovalStatus::Pending,
            "approved" => ApprovalStatus::Approved,
            _ => ApprovalStatus::Denied,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Denied => "denied",
        }
    }
}

impl From<String> for ApprovalStatus {
    fn from(s: String) -> Self {
        ApprovalStatus::from_str_or_denied(&s)
    }
}

impl From<ApprovalStatus> for String {
    fn from(status: ApprovalStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Raw account returned by the auth provider, before the profile is merged.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthAccount {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthAccount {
    /// True when the ID token expires within `margin_secs` of `now`.
    pub fn expires_within(&self, now: DateTime<Utc>, margin_secs: i64) -> bool {
        self.expires_at
            .map(|at| at - now <= chrono::Duration::seconds(margin_secs))
            .unwrap_or(false)
    }
}

impl fmt::Debug for AuthAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthAccount")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("id_token", &"[redacted]")
            .field("refresh_token", &"[redacted]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Profile document stored alongside the account, keyed by account id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default = "unset_role")]
    pub role: Role,
    #[serde(default)]
    pub approval_status: ApprovalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

fn unset_role() -> Role {
    Role::Unrecognized(String::new())
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            role: unset_role(),
            approval_status: ApprovalStatus::Pending,
            original_role: None,
            display_name: None,
        }
    }
}

/// The resolved, authenticated principal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub approval_status: ApprovalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Identity {
    /// Merge a profile document onto the provider account.
    pub fn from_parts(account: &AuthAccount, profile: Profile) -> Self {
        Self {
            id: account.id.clone(),
            email: account.email.clone(),
            role: profile.role,
            approval_status: profile.approval_status,
            original_role: profile.original_role,
            display_name: profile.display_name,
        }
    }

    /// Strict membership test. Unrecognized roles never match, even if the
    /// same unrecognized value appears in `candidates`.
    pub fn has_any_role(&self, candidates: &[Role]) -> bool {
        self.role.is_recognized() && candidates.contains(&self.role)
    }

    pub fn is_approved(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved
    }

    /// Name shown in the UI header.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.email)
    }
}

/// Email/password sign-in request.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct Credentials {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}
