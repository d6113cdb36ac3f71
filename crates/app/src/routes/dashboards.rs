use crate::auth::use_auth;
use dioxus::prelude::*;

#[component]
fn DashboardShell(heading: String, sections: Vec<&'static str>) -> Element {
    let auth = use_auth();
    let greeting = auth
        .session
        .read()
        .identity()
        .map(|identity| format!("Welcome, {}", identity.label()))
        .unwrap_or_default();

    rsx! {
        div { class: "dashboard-page",
            h2 { class: "dashboard-title", "{heading}" }
            p { class: "dashboard-greeting", "{greeting}" }
            ul { class: "dashboard-sections",
                for section in sections {
                    li { key: "{section}", class: "dashboard-section", "{section}" }
                }
            }
        }
    }
}

#[component]
pub fn AdminDashboard() -> Element {
    rsx! {
        DashboardShell {
            heading: "Office",
            sections: vec!["Jobs", "Estimates", "Invoices", "Payroll", "Materials", "Pricing", "Users"],
        }
    }
}

#[component]
pub fn CustomerDashboard() -> Element {
    rsx! {
        DashboardShell {
            heading: "My Projects",
            sections: vec!["Projects", "Estimates", "Invoices"],
        }
    }
}

#[component]
pub fn EmployeeDashboard() -> Element {
    rsx! {
        DashboardShell {
            heading: "Timesheets",
            sections: vec!["Timesheets", "Pay Stubs"],
        }
    }
}

#[component]
pub fn FieldStaffDashboard() -> Element {
    rsx! {
        DashboardShell {
            heading: "Job Sites",
            sections: vec!["Today's Jobs", "Materials", "Time Clock"],
        }
    }
}
