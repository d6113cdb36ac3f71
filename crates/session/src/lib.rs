//! Session resolution, route guarding and post-login routing.
//!
//! Framework-agnostic: the Dioxus front end and the integration tests drive
//! the same types.

pub mod dashboard;
pub mod guard;
pub mod navigation;
pub mod provider;
pub mod resolver;

pub use dashboard::{DashboardRouter, PRIVILEGED_ACCOUNT_ID};
pub use guard::{evaluate, DenialReason, GuardConfig, GuardDecision, RouteGuard};
pub use navigation::Navigator;
pub use provider::{AuthProvider, ProfileStore};
pub use resolver::{SessionResolver, SessionState};
