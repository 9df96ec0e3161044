// Request context: everything a route needs, built once at startup and
// shared across handlers as `Arc<HostConnectContext>`.

use std::sync::Arc;

use hostconnect_core::error::HostConnectError;
use hostconnect_core::{HostConnectOptions, Store};
use hostconnect_stripe::{HttpTokenExchanger, StripeConnectOptions, TokenExchanger};

pub struct HostConnectContext {
    /// Service options (bearer token secret and lifetime).
    pub options: HostConnectOptions,

    /// Stripe Connect platform settings.
    pub stripe: StripeConnectOptions,

    /// Persistence backend.
    pub store: Arc<dyn Store>,

    /// Performs the callback's code-for-token exchange.
    pub token_exchanger: Arc<dyn TokenExchanger>,
}

impl HostConnectContext {
    pub fn new(
        options: HostConnectOptions,
        stripe: StripeConnectOptions,
        store: Arc<dyn Store>,
        token_exchanger: Arc<dyn TokenExchanger>,
    ) -> Arc<Self> {
        Arc::new(Self {
            options,
            stripe,
            store,
            token_exchanger,
        })
    }

    /// Validate the options and wire the reqwest-backed exchanger.
    ///
    /// Without an explicit `redirect_uri`, the callback under `base_url` is used.
    pub fn from_options(
        options: HostConnectOptions,
        mut stripe: StripeConnectOptions,
        store: Arc<dyn Store>,
    ) -> Result<Arc<Self>, HostConnectError> {
        options.validate()?;
        stripe.validate()?;

        if stripe.redirect_uri.is_none() {
            stripe.redirect_uri = options.base_url.as_deref().map(callback_url);
        }

        let exchanger = HttpTokenExchanger::new(stripe.clone())
            .map_err(|e| HostConnectError::Config(e.to_string()))?;

        Ok(Self::new(options, stripe, store, Arc::new(exchanger)))
    }
}

/// Public URL of the Stripe callback route.
pub fn callback_url(base_url: &str) -> String {
    format!("{}/stripe/oauth/callback", base_url.trim_end_matches('/'))
}

impl std::fmt::Debug for HostConnectContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostConnectContext")
            .field("stripe", &self.stripe)
            .finish_non_exhaustive()
    }
}
