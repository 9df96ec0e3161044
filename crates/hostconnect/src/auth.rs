// Bearer authentication.
//
// Tokens are HS256 JWTs carrying `UserClaims`. A token is accepted only if it
// verifies against the configured secret, has not expired and its user still
// exists.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use hostconnect_core::error::{ApiError, HostConnectError};
use hostconnect_core::{HostConnectOptions, User};

use crate::context::HostConnectContext;

/// Claims of a user bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    /// User id.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl UserClaims {
    pub fn new(user_id: &str, lifetime_secs: u64) -> Self {
        let iat = chrono::Utc::now().timestamp();
        let lifetime = i64::try_from(lifetime_secs).unwrap_or(i64::MAX);
        Self {
            sub: user_id.to_string(),
            iat,
            exp: iat.saturating_add(lifetime),
        }
    }
}

fn sign(claims: &UserClaims, secret: &str) -> Result<String, HostConnectError> {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| HostConnectError::Crypto(format!("failed to sign bearer token: {e}")))
}

fn verify(token: &str, secret: &str) -> Result<UserClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    jsonwebtoken::decode::<UserClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
}

/// Issue a bearer token for `user`, valid for `options.token_expires_in` seconds.
pub fn issue_token(options: &HostConnectOptions, user: &User) -> Result<String, HostConnectError> {
    sign(&UserClaims::new(&user.id, options.token_expires_in), &options.secret)
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve the caller behind a bearer token. Anything short of a valid token
/// for an existing user is `unauthorized`.
pub async fn authenticate(ctx: &HostConnectContext, token: Option<&str>) -> Result<User, ApiError> {
    let token = token.ok_or_else(ApiError::unauthorized)?;

    let claims = verify(token, &ctx.options.secret).map_err(|e| {
        tracing::debug!(reason = ?e.kind(), "rejected bearer token");
        ApiError::unauthorized()
    })?;

    ctx.store
        .find_user_by_id(&claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::debug!(user_id = %claims.sub, "bearer token for unknown user");
            ApiError::unauthorized()
        })
}
