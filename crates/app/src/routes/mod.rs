pub mod dashboards;
pub mod guard;
pub mod home;
pub mod login;
pub mod not_found;
pub mod pending_approval;

use crate::auth::use_auth;
use dioxus::prelude::*;
use session::GuardConfig;
use shared_types::Role;

use dashboards::{AdminDashboard, CustomerDashboard, EmployeeDashboard, FieldStaffDashboard};
use guard::Guarded;
use home::Home;
use login::Login;
use not_found::NotFound;
use pending_approval::PendingApproval;

pub use guard::RouterNavigator;

/// Application routes. Paths match `shared_types::Destination`.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[layout(AppLayout)]
    #[layout(SignedInArea)]
    #[route("/pending-approval")]
    PendingApproval {},
    #[end_layout]
    #[layout(AdminArea)]
    #[route("/dashboard/admin")]
    AdminDashboard {},
    #[end_layout]
    #[layout(CustomerArea)]
    #[route("/dashboard/customer")]
    CustomerDashboard {},
    #[end_layout]
    #[layout(EmployeeArea)]
    #[route("/dashboard/employee")]
    EmployeeDashboard {},
    #[end_layout]
    #[layout(FieldStaffArea)]
    #[route("/dashboard/field-staff")]
    FieldStaffDashboard {},
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Any signed-in identity, approved or not.
#[component]
fn SignedInArea() -> Element {
    rsx! {
        Guarded { config: GuardConfig::any_role().require_approval(false) }
    }
}

#[component]
fn AdminArea() -> Element {
    rsx! {
        Guarded { config: GuardConfig::roles([Role::OfficeAdmin]) }
    }
}

#[component]
fn CustomerArea() -> Element {
    rsx! {
        Guarded { config: GuardConfig::roles([Role::Customer]) }
    }
}

#[component]
fn EmployeeArea() -> Element {
    rsx! {
        Guarded { config: GuardConfig::roles([Role::Employee]) }
    }
}

#[component]
fn FieldStaffArea() -> Element {
    rsx! {
        Guarded { config: GuardConfig::roles([Role::FieldStaff]) }
    }
}

pub fn page_title(route: &Route) -> &'static str {
    match route {
        Route::AdminDashboard {} => "Office",
        Route::CustomerDashboard {} => "My Projects",
        Route::EmployeeDashboard {} => "Timesheets",
        Route::FieldStaffDashboard {} => "Job Sites",
        Route::PendingApproval {} => "Account Pending",
        Route::Home {} | Route::Login {} | Route::NotFound { .. } => "",
    }
}

/// Main app layout with the top navbar.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();
    let auth = use_auth();
    let title = page_title(&route);
    let user_label = auth
        .session
        .read()
        .identity()
        .map(|identity| identity.label().to_string());

    let resolver = auth.resolver();
    let handle_logout = move |_: MouseEvent| {
        let resolver = resolver.clone();
        async move {
            resolver.logout().await;
        }
    };

    rsx! {
        div { class: "app-shell",
            header { class: "app-navbar",
                span { class: "app-brand", "BuildSite" }
                h1 { class: "app-title", "{title}" }
                if let Some(name) = user_label {
                    div { class: "app-user",
                        span { class: "app-user-name", "{name}" }
                        button {
                            class: "button app-logout",
                            onclick: handle_logout,
                            "Sign Out"
                        }
                    }
                }
            }
            main { class: "app-content",
                Outlet::<Route> {}
            }
        }
    }
}
