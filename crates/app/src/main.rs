use dioxus::prelude::*;
use shared_types::ClientConfig;

mod auth;
mod components;
mod routes;
mod storage;
use auth::{use_auth, use_session_sync, AuthState};
use routes::Route;

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        server::config::load_config();
        Ok(dioxus::server::router(App))
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Fetch client config once; on error fall back to defaults (Firebase
    // unconfigured, sign-in reports the provider as unavailable).
    let config_resource =
        use_server_future(move || async move { server::api::get_client_config().await })?;

    let config = config_resource
        .read()
        .as_ref()
        .cloned()
        .unwrap_or(Ok(ClientConfig::default()))
        .unwrap_or_default();

    use_context_provider(|| AuthState::new(&config));
    use_session_sync(use_auth());

    rsx! {
        SuspenseBoundary {
            fallback: |_| rsx! {
                components::Loading {}
            },
            Router::<Route> {}
        }
    }
}
