use crate::auth::use_auth;
use crate::routes::RouterNavigator;
use dioxus::prelude::*;
use session::{DashboardRouter, Navigator, SessionState};
use shared_types::Credentials;
use std::collections::HashMap;
use validator::Validate;

/// First message per field, keyed by field name.
pub fn field_messages(errors: &validator::ValidationErrors) -> HashMap<String, String> {
    let mut messages = HashMap::new();
    for (field, errs) in errors.field_errors() {
        if let Some(first) = errs.first() {
            let msg = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}", field));
            messages.insert(field.to_string(), msg);
        }
    }
    messages
}

/// Send a signed-in visitor to their landing page. Returns whether it did.
pub fn route_signed_in(router: &DashboardRouter, state: &SessionState, nav: &impl Navigator) -> bool {
    if state.identity().is_none() {
        return false;
    }
    router.route(state, nav);
    true
}

/// Email/password login. The session effect is the only place that routes,
/// both after a successful sign-in and for a visitor already signed in.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    let session = auth.session;
    let router = auth.router.clone();
    use_effect(move || {
        let state = session.read().clone();
        route_signed_in(&router, &state, &RouterNavigator);
    });

    let resolver = auth.resolver();
    let handle_login = move |evt: FormEvent| {
        let resolver = resolver.clone();
        async move {
            evt.prevent_default();
            error_msg.set(None);
            field_errors.set(HashMap::new());

            let credentials = Credentials::new(email().trim(), password());
            if let Err(errors) = credentials.validate() {
                field_errors.set(field_messages(&errors));
                return;
            }

            loading.set(true);
            if let Err(e) = resolver.login(&credentials).await {
                tracing::warn!(error = %e, "Sign-in failed");
                error_msg.set(Some(e.friendly_message().to_string()));
            }
            loading.set(false);
        }
    };

    rsx! {
        div { class: "auth-page",
            div { class: "auth-card",
                h1 { class: "auth-title", "Sign In" }
                p { class: "auth-description", "Enter your credentials to access your account" }

                if let Some(err) = error_msg() {
                    div { class: "auth-error", "{err}" }
                }

                form { onsubmit: handle_login,
                    div { class: "auth-field",
                        label { r#for: "email", "Email" }
                        input {
                            r#type: "email",
                            id: "email",
                            placeholder: "you@company.com",
                            value: email(),
                            oninput: move |e: FormEvent| email.set(e.value()),
                        }
                        if let Some(err) = field_errors().get("email") {
                            div { class: "auth-field-error", "{err}" }
                        }
                    }
                    div { class: "auth-field",
                        label { r#for: "password", "Password" }
                        input {
                            r#type: "password",
                            id: "password",
                            placeholder: "Enter your password",
                            value: password(),
                            oninput: move |e: FormEvent| password.set(e.value()),
                        }
                        if let Some(err) = field_errors().get("password") {
                            div { class: "auth-field-error", "{err}" }
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "auth-submit button",
                        disabled: loading(),
                        if loading() { "Signing in..." } else { "Sign In" }
                    }
                }
            }
        }
    }
}
