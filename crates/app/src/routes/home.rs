use crate::auth::use_auth;
use crate::components::Loading;
use crate::routes::RouterNavigator;
use dioxus::prelude::*;

/// Landing page. Sends the visitor to their dashboard, or to login, as soon
/// as the session resolves.
#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let router = auth.router.clone();
    let session = auth.session;

    use_effect(move || {
        let state = session.read().clone();
        router.route(&state, &RouterNavigator);
    });

    rsx! { Loading {} }
}
