use dioxus::prelude::*;

use crate::routes::Route;

/// Unknown paths. Not guarded; the link goes home, which routes by session.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));
    tracing::debug!(%path, "No route matched");

    rsx! {
        div { class: "not-found-page",
            h1 { "Nothing here" }
            p { "There is no page at " code { "{path}" } "." }
            Link { to: Route::Home {}, class: "not-found-link", "Go to my dashboard" }
        }
    }
}
