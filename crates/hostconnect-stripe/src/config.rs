//! Stripe Connect configuration.

use serde::{Deserialize, Serialize};

use hostconnect_core::env;
use hostconnect_core::error::HostConnectError;

pub const DEFAULT_AUTHORIZE_URL: &str = "https://connect.stripe.com/oauth/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://connect.stripe.com/oauth/token";
pub const DEFAULT_SCOPE: &str = "read_write";

/// Stripe Connect platform settings (the `[stripe]` table of `hostconnect.toml`).
#[derive(Clone, Serialize, Deserialize)]
pub struct StripeConnectOptions {
    /// Platform client id (`ca_...`).
    #[serde(default)]
    pub client_id: String,
    /// Platform secret key, sent as `client_secret` in the token exchange.
    #[serde(default)]
    pub client_secret: String,
    /// Where Stripe sends the user back. Stripe falls back to the
    /// dashboard-configured redirect when omitted.
    #[serde(default)]
    pub redirect_uri: Option<String>,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// Timeout for the token exchange request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_scope() -> String { DEFAULT_SCOPE.to_string() }
fn default_authorize_url() -> String { DEFAULT_AUTHORIZE_URL.to_string() }
fn default_token_url() -> String { DEFAULT_TOKEN_URL.to_string() }
fn default_timeout_secs() -> u64 { 30 }

impl Default for StripeConnectOptions {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: None,
            scope: default_scope(),
            authorize_url: default_authorize_url(),
            token_url: default_token_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for StripeConnectOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConnectOptions")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl StripeConnectOptions {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Self::default()
        }
    }

    /// Parse the `[stripe]` table out of a full `hostconnect.toml`.
    pub fn from_toml_str(s: &str) -> Result<Self, HostConnectError> {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default)]
            stripe: StripeConnectOptions,
        }

        toml::from_str::<Wrapper>(s)
            .map(|w| w.stripe)
            .map_err(|e| HostConnectError::Config(e.to_string()))
    }

    /// `STRIPE_CLIENT_ID` and `STRIPE_SECRET` override file values.
    pub fn apply_env(mut self) -> Self {
        if let Some(id) = env::get_stripe_client_id_from_env() {
            self.client_id = id;
        }
        if let Some(secret) = env::get_stripe_secret_from_env() {
            self.client_secret = secret;
        }
        self
    }

    pub fn validate(&self) -> Result<(), HostConnectError> {
        if self.client_id.is_empty() {
            return Err(HostConnectError::Config(
                "stripe.client_id is required (set STRIPE_CLIENT_ID)".into(),
            ));
        }
        if self.client_secret.is_empty() {
            return Err(HostConnectError::Config(
                "stripe.client_secret is required (set STRIPE_SECRET)".into(),
            ));
        }
        for (name, value) in [
            ("stripe.authorize_url", &self.authorize_url),
            ("stripe.token_url", &self.token_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| HostConnectError::Config(format!("{name} is not a valid URL: {e}")))?;
        }
        Ok(())
    }
}
