// Stripe Connect token response.
//
// https://docs.stripe.com/connect/oauth-reference#post-token-response

use serde::{Deserialize, Serialize};

use hostconnect_core::NewStripeAccount;

use crate::error::StripeError;

/// Successful reply of `POST /oauth/token`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripeConnectTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub stripe_publishable_key: String,
    pub stripe_user_id: String,
    pub scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub livemode: Option<bool>,
}

impl std::fmt::Debug for StripeConnectTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConnectTokens")
            .field("token_type", &self.token_type)
            .field("stripe_user_id", &self.stripe_user_id)
            .field("scope", &self.scope)
            .field("livemode", &self.livemode)
            .finish_non_exhaustive()
    }
}

/// Error reply of `POST /oauth/token`.
#[derive(Debug, Deserialize)]
pub(crate) struct StripeOAuthErrorBody {
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl StripeOAuthErrorBody {
    /// Best human-readable message in the body.
    pub fn message(&self) -> Option<String> {
        self.error_description.clone().or_else(|| self.error.clone())
    }
}

impl StripeConnectTokens {
    /// Parse a raw token reply. Every credential field is required.
    pub fn from_raw(data: &serde_json::Value) -> Result<Self, StripeError> {
        serde_json::from_value(data.clone()).map_err(|e| StripeError::InvalidResponse(e.to_string()))
    }
}

impl From<StripeConnectTokens> for NewStripeAccount {
    fn from(tokens: StripeConnectTokens) -> Self {
        NewStripeAccount {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            stripe_publishable_key: tokens.stripe_publishable_key,
            stripe_user_id: tokens.stripe_user_id,
            scope: tokens.scope,
        }
    }
}
