// Environment detection and tracing initialization.

use std::sync::OnceLock;

/// Cached environment mode.
static ENV_MODE: OnceLock<EnvMode> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvMode {
    Production,
    Development,
    Test,
}

impl EnvMode {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "production" | "prod" => EnvMode::Production,
            "test" | "testing" => EnvMode::Test,
            _ => EnvMode::Development,
        }
    }
}

/// Detect the current environment mode.
/// Checks `HOSTCONNECT_ENV` then `RUST_ENV`.
pub fn detect_env_mode() -> EnvMode {
    *ENV_MODE.get_or_init(|| {
        let env_val = std::env::var("HOSTCONNECT_ENV")
            .or_else(|_| std::env::var("RUST_ENV"))
            .unwrap_or_default();
        EnvMode::parse(&env_val)
    })
}

pub fn is_production() -> bool {
    detect_env_mode() == EnvMode::Production
}

/// `HOSTCONNECT_SECRET`, the bearer token signing key.
pub fn get_secret_from_env() -> Option<String> {
    non_empty_var("HOSTCONNECT_SECRET")
}

/// `STRIPE_CLIENT_ID`, the Connect platform client id (`ca_...`).
pub fn get_stripe_client_id_from_env() -> Option<String> {
    non_empty_var("STRIPE_CLIENT_ID")
}

/// `STRIPE_SECRET`, the platform secret key used for the token exchange.
pub fn get_stripe_secret_from_env() -> Option<String> {
    non_empty_var("STRIPE_SECRET")
}

/// `DATABASE_URL`, either `memory` or a sqlx connection url.
pub fn get_database_url_from_env() -> Option<String> {
    non_empty_var("DATABASE_URL")
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Initialize the `tracing` subscriber.
/// `RUST_LOG` wins when set; otherwise production logs at info and everything else at debug.
pub fn init_logger() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production() {
            EnvFilter::new("hostconnect=info,tower_http=info")
        } else {
            EnvFilter::new("hostconnect=debug,tower_http=debug")
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .try_init();
}
