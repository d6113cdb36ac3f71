use crate::auth::use_auth;
use crate::routes::RouterNavigator;
use dioxus::prelude::*;

/// Shown to accounts an administrator has not vetted yet.
#[component]
pub fn PendingApproval() -> Element {
    let auth = use_auth();
    let router = auth.router.clone();
    let support_email = auth.support_email.clone();
    let resolver = auth.resolver();
    let mut checking = use_signal(|| false);

    let handle_check = move |_: MouseEvent| {
        let resolver = resolver.clone();
        let router = router.clone();
        async move {
            checking.set(true);
            resolver.refresh().await;
            let state = resolver.state();
            if state.identity().is_some_and(|identity| identity.is_approved()) {
                router.route(&state, &RouterNavigator);
            }
            checking.set(false);
        }
    };

    rsx! {
        div { class: "pending-page",
            h2 { "Your account is awaiting approval" }
            p {
                "An administrator will review your request shortly. "
                "Questions? Contact "
                a { href: "mailto:{support_email}", "{support_email}" }
                "."
            }
            button {
                class: "button",
                disabled: checking(),
                onclick: handle_check,
                if checking() { "Checking..." } else { "Check again" }
            }
        }
    }
}
