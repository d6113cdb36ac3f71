use dioxus::prelude::*;
use session::DenialReason;

/// In-place denial view. Rendered by a guard instead of the page; the URL
/// does not change.
#[component]
pub fn AccessDenied(reason: DenialReason, support_email: String) -> Element {
    let title = reason.title();
    let message = reason.message(&support_email);
    let mailto = format!("mailto:{support_email}");

    rsx! {
        div { class: "access-denied",
            h1 { class: "access-denied-title", "{title}" }
            p { class: "access-denied-message", "{message}" }
            if reason == DenialReason::AccountDenied {
                a { class: "access-denied-contact", href: "{mailto}", "Contact support" }
            }
        }
    }
}
