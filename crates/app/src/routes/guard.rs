use crate::auth::use_auth;
use crate::components::{AccessDenied, Loading};
use crate::routes::Route;
use dioxus::prelude::*;
use session::{GuardConfig, GuardDecision, Navigator, RouteGuard};
use std::cell::RefCell;
use std::rc::Rc;

/// `Navigator` backed by the Dioxus router.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterNavigator;

impl Navigator for RouterNavigator {
    fn navigate(&self, path: &str) {
        match path.parse::<Route>() {
            Ok(route) => {
                navigator().push(route);
            }
            Err(_) => {
                tracing::warn!(path, "Navigation target is not an app route");
                navigator().push(NavigationTarget::<Route>::External(path.to_string()));
            }
        }
    }
}

/// Guard layout: renders the nested route only when `config` admits the
/// current session.
///
/// Re-renders whenever the session signal changes; the `RouteGuard` kept in
/// the hook makes sure each redirect is pushed once.
#[component]
pub fn Guarded(config: GuardConfig) -> Element {
    let auth = use_auth();
    let guard = use_hook(|| Rc::new(RefCell::new(RouteGuard::new(config.clone()))));

    let state = auth.session.read().clone();
    let decision = guard.borrow_mut().observe(&state, &RouterNavigator);

    match decision {
        GuardDecision::Loading => rsx! { Loading {} },
        GuardDecision::Redirect(_) => rsx! {},
        GuardDecision::Deny(reason) => rsx! {
            AccessDenied { reason, support_email: auth.support_email.clone() }
        },
        GuardDecision::Render => rsx! { Outlet::<Route> {} },
    }
}
