//! Stripe Connect error codes.

use hostconnect_core::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StripeError {
    /// The token endpoint could not be reached.
    #[error("Stripe token endpoint request failed: {0}")]
    Transport(String),

    /// Stripe answered with a non-2xx status.
    #[error("Stripe rejected the authorization code ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The reply was not JSON or lacked a required field.
    #[error("Invalid Stripe token response: {0}")]
    InvalidResponse(String),

    #[error("Invalid Stripe authorize URL: {0}")]
    InvalidUrl(String),
}

impl StripeError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "TOKEN_REQUEST_FAILED",
            Self::Rejected { .. } => "TOKEN_REJECTED",
            Self::InvalidResponse(_) => "INVALID_TOKEN_RESPONSE",
            Self::InvalidUrl(_) => "INVALID_AUTHORIZE_URL",
        }
    }
}

impl From<StripeError> for ApiError {
    fn from(e: StripeError) -> Self {
        match e {
            StripeError::InvalidUrl(_) => ApiError::internal(),
            other => ApiError::upstream(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostconnect_core::error::ErrorType;

    #[test]
    fn exchange_failures_become_upstream_errors() {
        let err: ApiError = StripeError::Rejected {
            status: 400,
            message: "Authorization code does not exist".into(),
        }
        .into();
        assert_eq!(err.kind, ErrorType::UpstreamFailure);
        assert!(err.message.contains("Authorization code does not exist"));
    }

    #[test]
    fn bad_configuration_is_a_server_error() {
        let err: ApiError = StripeError::InvalidUrl("relative URL without a base".into()).into();
        assert_eq!(err.kind, ErrorType::ServerError);
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(StripeError::Transport("x".into()).code(), "TOKEN_REQUEST_FAILED");
        assert_eq!(
            StripeError::InvalidResponse("x".into()).code(),
            "INVALID_TOKEN_RESPONSE"
        );
    }
}
