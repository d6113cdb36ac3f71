use shared_types::AppConfig;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();
static DEFAULT: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Read `.env` and `config.toml`, apply environment overrides, and store the
/// result in the global `OnceLock`. Only the first call has effect.
///
/// A missing or unparseable file yields the defaults.
pub fn load_config() {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();
        let mut config = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => parse_config(&contents),
            Err(e) => {
                tracing::warn!(path = CONFIG_PATH, error = %e, "Config file not found, using defaults");
                AppConfig::default()
            }
        };
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        tracing::info!(
            firebase_configured = config.firebase.is_configured(),
            project_id = %config.firebase.project_id,
            "Configuration loaded"
        );
        config
    });
}

/// Get the loaded configuration, or defaults if `load_config()` has not run.
pub fn app_config() -> &'static AppConfig {
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(AppConfig::default))
}

/// Parse `config.toml` contents, falling back to defaults on error.
pub fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::error!(path = CONFIG_PATH, error = %e, "Failed to parse config, using defaults");
        AppConfig::default()
    })
}

/// Environment variables take precedence over the file. Empty values are ignored.
pub fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(v) = var("FIREBASE_API_KEY") {
        config.firebase.api_key = v;
    }
    if let Some(v) = var("FIREBASE_PROJECT_ID") {
        config.firebase.project_id = v;
    }
    if let Some(v) = var("FIREBASE_AUTH_EMULATOR_HOST") {
        // Emulator serves both auth APIs under one host.
        config.firebase.auth_base_url = format!("http://{v}/identitytoolkit.googleapis.com");
        config.firebase.token_base_url = format!("http://{v}/securetoken.googleapis.com");
    }
    if let Some(v) = var("FIRESTORE_EMULATOR_HOST") {
        config.firebase.firestore_base_url = format!("http://{v}");
    }
    if let Some(v) = var("PRIVILEGED_ACCOUNT_ID") {
        config.access.privileged_account_id = Some(v);
    }
    if let Some(v) = var("SUPPORT_EMAIL") {
        config.support.email = v;
    }
}
