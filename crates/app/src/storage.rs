use dioxus::prelude::*;
use server::firebase::TokenStore;

/// `localStorage` key holding the Firebase refresh token.
pub const REFRESH_TOKEN_KEY: &str = "buildsite.refresh_token";

/// Refresh token kept in the browser's `localStorage`, so a reload resumes
/// the session instead of asking for the password again.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStore;

fn load_script() -> String {
    format!("return window.localStorage.getItem({});", js_string(REFRESH_TOKEN_KEY))
}

fn save_script(refresh_token: &str) -> String {
    format!(
        "window.localStorage.setItem({}, {}); return null;",
        js_string(REFRESH_TOKEN_KEY),
        js_string(refresh_token)
    )
}

fn clear_script() -> String {
    format!(
        "window.localStorage.removeItem({}); return null;",
        js_string(REFRESH_TOKEN_KEY)
    )
}

/// Quote `value` as a JavaScript string literal.
fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

async fn run(script: String) -> Option<String> {
    match document::eval(&script).join::<Option<String>>().await {
        Ok(value) => value.filter(|token| !token.is_empty()),
        Err(e) => {
            tracing::warn!(error = ?e, "Browser storage unavailable");
            None
        }
    }
}

impl TokenStore for BrowserTokenStore {
    async fn load(&self) -> Option<String> {
        run(load_script()).await
    }

    async fn save(&self, refresh_token: &str) {
        run(save_script(refresh_token)).await;
    }

    async fn clear(&self) {
        run(clear_script()).await;
    }
}
