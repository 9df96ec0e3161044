// Service-wide options.
//
// Loaded from the top level of `hostconnect.toml`, then overridden by
// environment variables. Handlers receive these through the
// request context; nothing reads them from globals.

use serde::{Deserialize, Serialize};

use crate::env;
use crate::error::HostConnectError;

/// Default bearer token lifetime: 30 days.
pub const DEFAULT_TOKEN_EXPIRES_IN: u64 = 60 * 60 * 24 * 30;

/// Minimum accepted secret length.
pub const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConnectOptions {
    /// HS256 key used to sign and verify bearer tokens.
    #[serde(default)]
    pub secret: String,

    /// Public base URL of this service, e.g. `https://api.example.com`.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Bearer token lifetime in seconds.
    #[serde(default = "default_token_expires_in")]
    pub token_expires_in: u64,
}

fn default_token_expires_in() -> u64 {
    DEFAULT_TOKEN_EXPIRES_IN
}

impl Default for HostConnectOptions {
    fn default() -> Self {
        Self {
            secret: String::new(),
            base_url: None,
            token_expires_in: DEFAULT_TOKEN_EXPIRES_IN,
        }
    }
}

impl HostConnectOptions {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Self::default()
        }
    }

    /// Parse options from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, HostConnectError> {
        toml::from_str(s).map_err(|e| HostConnectError::Config(e.to_string()))
    }

    /// Fill in values from the environment. Environment wins over the file.
    pub fn apply_env(mut self) -> Self {
        if let Some(secret) = env::get_secret_from_env() {
            self.secret = secret;
        }
        self
    }

    pub fn validate(&self) -> Result<(), HostConnectError> {
        if self.secret.is_empty() {
            return Err(HostConnectError::Config(
                "secret is required (set HOSTCONNECT_SECRET)".into(),
            ));
        }
        if self.secret.len() < MIN_SECRET_LENGTH {
            return Err(HostConnectError::Config(format!(
                "secret must be at least {MIN_SECRET_LENGTH} characters"
            )));
        }
        if self.token_expires_in == 0 {
            return Err(HostConnectError::Config(
                "token_expires_in must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
