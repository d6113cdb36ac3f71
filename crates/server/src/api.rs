use dioxus::prelude::*;
use shared_types::ClientConfig;

/// Firebase project settings, support contact and access overrides for the
/// browser. No auth required; nothing here is secret.
#[server]
pub async fn get_client_config() -> Result<ClientConfig, ServerFnError> {
    Ok(crate::config::app_config().client_config())
}
