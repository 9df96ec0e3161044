// Authorization code exchange against the Stripe Connect token endpoint.
//
// POST {token_url} with JSON {grant_type, client_id, client_secret, code}.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::StripeConnectOptions;
use crate::error::StripeError;
use crate::tokens::{StripeConnectTokens, StripeOAuthErrorBody};

/// Trades an authorization code for connected-account credentials.
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    async fn exchange_code(&self, code: &str) -> Result<StripeConnectTokens, StripeError>;
}

/// [`TokenExchanger`] that calls Stripe over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTokenExchanger {
    client: reqwest::Client,
    options: StripeConnectOptions,
}

impl HttpTokenExchanger {
    pub fn new(options: StripeConnectOptions) -> Result<Self, StripeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .build()
            .map_err(|e| StripeError::Transport(e.to_string()))?;
        Ok(Self { client, options })
    }
}

#[async_trait]
impl TokenExchanger for HttpTokenExchanger {
    async fn exchange_code(&self, code: &str) -> Result<StripeConnectTokens, StripeError> {
        let body = serde_json::json!({
            "grant_type": "authorization_code",
            "client_id": self.options.client_id,
            "client_secret": self.options.client_secret,
            "code": code,
        });

        tracing::debug!(token_url = %self.options.token_url, "exchanging Stripe authorization code");

        let response = self
            .client
            .post(&self.options.token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| StripeError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| StripeError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<StripeOAuthErrorBody>(&text)
                .ok()
                .and_then(|b| b.message())
                .unwrap_or(text);
            return Err(StripeError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let data: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| StripeError::InvalidResponse(e.to_string()))?;

        StripeConnectTokens::from_raw(&data)
    }
}
