use dioxus::prelude::*;

/// Placeholder shown while the session is still resolving.
#[component]
pub fn Loading() -> Element {
    rsx! {
        div { class: "auth-guard-loading",
            p { "Loading..." }
        }
    }
}
