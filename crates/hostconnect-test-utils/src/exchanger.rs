// StubExchanger: canned `TokenExchanger` that records calls.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use hostconnect_stripe::{StripeConnectTokens, StripeError, TokenExchanger};

use crate::fixtures::stripe_reply;

#[derive(Debug, Clone)]
pub struct StubExchanger {
    reply: Result<StripeConnectTokens, StripeError>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for StubExchanger {
    fn default() -> Self {
        Self::succeeding(stripe_reply())
    }
}

impl StubExchanger {
    /// Answer every exchange with `tokens`.
    pub fn succeeding(tokens: StripeConnectTokens) -> Self {
        Self {
            reply: Ok(tokens),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail every exchange with `error`.
    pub fn failing(error: StripeError) -> Self {
        Self {
            reply: Err(error),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Codes passed to `exchange_code`, in call order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl TokenExchanger for StubExchanger {
    async fn exchange_code(&self, code: &str) -> Result<StripeConnectTokens, StripeError> {
        self.calls.lock().await.push(code.to_string());
        self.reply.clone()
    }
}
