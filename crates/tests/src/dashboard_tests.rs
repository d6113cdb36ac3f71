use crate::common::*;
use pretty_assertions::assert_eq;
use session::{DashboardRouter, SessionResolver, SessionState, PRIVILEGED_ACCOUNT_ID};
use shared_types::{ApprovalStatus, Destination, Profile, Role};

#[tokio::test]
async fn each_staff_login_lands_on_its_dashboard() {
    let resolver = resolver_with_staff();
    let router = DashboardRouter::default();
    let cases = [
        ("office", Destination::AdminDashboard),
        ("client", Destination::CustomerDashboard),
        ("crew", Destination::FieldStaffDashboard),
        // Role rules come before the pending rule.
        ("newbie", Destination::CustomerDashboard),
    ];

    for (id, expected) in cases {
        let nav = RecordingNavigator::new();
        let identity = resolver.login(&credentials(id)).await.unwrap();
        assert_eq!(
            router.route(&SessionState::Present(identity), &nav),
            Some(expected)
        );
        assert_eq!(nav.visits(), vec![expected.path().to_string()]);
    }
}

#[test]
fn customer_with_admin_original_role_goes_to_admin() {
    let mut who = identity("uid-5", Role::Customer, ApprovalStatus::Approved);
    who.original_role = Some(Role::Admin);
    assert_eq!(
        DashboardRouter::default().resolve(&who),
        Destination::AdminDashboard
    );
}

#[test]
fn unrecognized_approved_role_falls_back_to_customer() {
    let who = identity("uid-5", Role::parse("estimator"), ApprovalStatus::Approved);
    assert_eq!(
        DashboardRouter::default().resolve(&who),
        Destination::CustomerDashboard
    );
}

#[test]
fn privileged_account_goes_to_admin_whatever_its_role() {
    let who = identity(PRIVILEGED_ACCOUNT_ID, Role::Employee, ApprovalStatus::Pending);
    assert_eq!(
        DashboardRouter::default().resolve(&who),
        Destination::AdminDashboard
    );

    let configured = DashboardRouter::new(Some("owner-7".into()));
    assert_eq!(configured.resolve(&who), Destination::EmployeeDashboard);
    let owner = identity("owner-7", Role::Customer, ApprovalStatus::Approved);
    assert_eq!(configured.resolve(&owner), Destination::AdminDashboard);
}

#[tokio::test]
async fn account_without_profile_lands_on_pending_approval() {
    let provider = InMemoryAuthProvider::new().with_account("fresh");
    let resolver = SessionResolver::new(provider, InMemoryProfileStore::new());
    let nav = RecordingNavigator::new();

    let identity = resolver.login(&credentials("fresh")).await.unwrap();
    DashboardRouter::default().route(&SessionState::Present(identity), &nav);

    assert_eq!(nav.visits(), vec!["/pending-approval".to_string()]);
}

#[tokio::test]
async fn employee_lands_on_employee_dashboard() {
    let provider = InMemoryAuthProvider::new().with_account("payroll");
    let profiles = InMemoryProfileStore::new().with_profile(
        "payroll",
        Profile {
            display_name: Some("Pat".into()),
            ..profile(Role::Employee, ApprovalStatus::Approved)
        },
    );
    let resolver = SessionResolver::new(provider, profiles);
    let identity = resolver.login(&credentials("payroll")).await.unwrap();

    assert_eq!(identity.label(), "Pat");
    assert_eq!(
        DashboardRouter::default().resolve(&identity),
        Destination::EmployeeDashboard
    );
}

#[test]
fn signed_out_routes_to_login_and_loading_waits() {
    let nav = RecordingNavigator::new();
    let router = DashboardRouter::default();
    assert_eq!(router.route(&SessionState::Unresolved, &nav), None);
    assert_eq!(
        router.route(&SessionState::Absent, &nav),
        Some(Destination::Login)
    );
    assert_eq!(nav.visits(), vec!["/login".to_string()]);
}
