// Error taxonomy shared by every route.
//
// API errors render as `{"error": {"code": 400, "type": "bad_request", "message": "..."}}`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::db::store::StoreError;

/// The `type` field of an API error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    BadRequest,
    Unauthorized,
    NotFound,
    UpstreamFailure,
    ServerError,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::UpstreamFailure => "upstream_failure",
            Self::ServerError => "server_error",
        }
    }

    /// HTTP status an error of this type is returned with.
    pub fn status(&self) -> HttpStatus {
        match self {
            Self::BadRequest => HttpStatus::BadRequest,
            Self::Unauthorized => HttpStatus::Unauthorized,
            Self::NotFound => HttpStatus::NotFound,
            Self::UpstreamFailure => HttpStatus::BadGateway,
            Self::ServerError => HttpStatus::InternalServerError,
        }
    }

    /// Message used when the caller does not supply one.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad request",
            Self::Unauthorized => "Unauthorized",
            Self::NotFound => "Not found",
            Self::UpstreamFailure => "Stripe token exchange failed",
            Self::ServerError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP status codes used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpStatus {
    BadRequest = 400,
    Unauthorized = 401,
    NotFound = 404,
    InternalServerError = 500,
    BadGateway = 502,
}

impl HttpStatus {
    pub fn status_code(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status_code())
    }
}

/// An error returned to the HTTP caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} {kind}: {message}", .kind.status())]
pub struct ApiError {
    pub kind: ErrorType,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorType) -> Self {
        Self {
            message: kind.default_message().to_string(),
            kind,
        }
    }

    pub fn with_message(kind: ErrorType, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_message(ErrorType::BadRequest, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(ErrorType::Unauthorized)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(ErrorType::NotFound, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::with_message(ErrorType::UpstreamFailure, message)
    }

    pub fn internal() -> Self {
        Self::new(ErrorType::ServerError)
    }

    pub fn status(&self) -> HttpStatus {
        self.kind.status()
    }

    /// Build the JSON body for the error response.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.status().status_code(),
                "type": self.kind,
                "message": self.message,
            }
        })
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(msg) => ApiError::not_found(msg),
            StoreError::Duplicate(msg) => ApiError::bad_request(msg),
            other => {
                tracing::error!(error = %other, "store failure");
                ApiError::internal()
            }
        }
    }
}

/// Internal (non-HTTP) error, used for configuration and startup failures.
#[derive(Debug, thiserror::Error)]
pub enum HostConnectError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_renders_nested_error_body() {
        let err = ApiError::bad_request("Group is not a host.");
        assert_eq!(
            err.to_json(),
            serde_json::json!({
                "error": {
                    "code": 400,
                    "type": "bad_request",
                    "message": "Group is not a host."
                }
            })
        );
    }

    #[test]
    fn default_messages_follow_type() {
        assert_eq!(ApiError::unauthorized().message, "Unauthorized");
        assert_eq!(ApiError::new(ErrorType::BadRequest).message, "Bad request");
        assert_eq!(ApiError::internal().status().status_code(), 500);
    }

    #[test]
    fn upstream_failure_is_bad_gateway() {
        let err = ApiError::upstream("boom");
        assert_eq!(err.status(), HttpStatus::BadGateway);
        assert_eq!(err.to_json()["error"]["type"], "upstream_failure");
        assert_eq!(err.to_json()["error"]["code"], 502);
    }

    #[test]
    fn store_not_found_maps_to_404() {
        let err: ApiError = StoreError::NotFound("Group x not found".into()).into();
        assert_eq!(err.kind, ErrorType::NotFound);
        assert_eq!(err.message, "Group x not found");
    }

    #[test]
    fn store_database_error_hides_details() {
        let err: ApiError = StoreError::Database("disk on fire".into()).into();
        assert_eq!(err.kind, ErrorType::ServerError);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn display_includes_status_and_type() {
        let err = ApiError::bad_request("Group does not exist");
        assert_eq!(err.to_string(), "400 bad_request: Group does not exist");
    }
}
