//! Axum integration for hostconnect.
//!
//! Maps the framework-agnostic route functions in [`hostconnect::routes`]
//! onto an axum [`Router`]:
//!
//! | method | path | handler |
//! |---|---|---|
//! | GET | `/ok` | health |
//! | POST | `/groups` | create group (bearer) |
//! | GET | `/groups/{groupId}` | read group (bearer) |
//! | GET | `/groups/{groupId}/stripe/authorize` | 302 to Stripe Connect (bearer) |
//! | GET | `/stripe/oauth/callback` | code exchange and account link |

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use hostconnect::auth::{authenticate, bearer_token};
use hostconnect::routes;
use hostconnect::HostConnectContext;
use hostconnect_core::error::ApiError;
use hostconnect_core::User;

// ─── Error Handling ──────────────────────────────────────────────

/// Wrapper that renders an [`ApiError`] as
/// `{"error":{"code","type","message"}}` with the matching status.
#[derive(Debug)]
pub struct HttpError(pub ApiError);

impl From<ApiError> for HttpError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self.0, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.0, "request rejected");
        }
        (status, Json(self.0.to_json())).into_response()
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ApiError::bad_request(rejection.body_text()))
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self(ApiError::bad_request(rejection.body_text()))
    }
}

// ─── Bearer Extraction ───────────────────────────────────────────

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
}

async fn require_user(ctx: &HostConnectContext, headers: &HeaderMap) -> Result<User, HttpError> {
    Ok(authenticate(ctx, extract_bearer(headers)).await?)
}

// ─── HostConnect Builder ─────────────────────────────────────────

/// Entry point for serving hostconnect with axum.
///
/// ```rust,ignore
/// let ctx = HostConnectContext::from_options(options, stripe, store)?;
/// let app = HostConnect::new(ctx).router();
/// axum::serve(listener, app).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HostConnect {
    ctx: Arc<HostConnectContext>,
}

impl HostConnect {
    pub fn new(ctx: Arc<HostConnectContext>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &Arc<HostConnectContext> {
        &self.ctx
    }

    /// Build the router with request tracing.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/ok", get(handle_ok))
            .route("/groups", post(handle_create_group))
            .route("/groups/{groupId}", get(handle_get_group))
            .route("/groups/{groupId}/stripe/authorize", get(handle_authorize))
            .route("/stripe/oauth/callback", get(handle_callback))
            .layer(TraceLayer::new_for_http())
            .with_state(self.ctx.clone())
    }

    /// Build the router with permissive CORS. Configure CORS manually for production.
    pub fn router_with_cors(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        self.router().layer(cors)
    }
}

// ─── Route Handlers ─────────────────────────────────────────────

fn redirect_found(url: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response()
}

async fn handle_ok() -> impl IntoResponse {
    Json(routes::ok::handle_ok())
}

async fn handle_create_group(
    State(ctx): State<Arc<HostConnectContext>>,
    headers: HeaderMap,
    body: Result<Json<routes::groups::CreateGroupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let user = require_user(&ctx, &headers).await?;
    let Json(body) = body?;
    let group = routes::groups::handle_create_group(ctx, &user, body).await?;
    Ok(Json(group))
}

async fn handle_get_group(
    State(ctx): State<Arc<HostConnectContext>>,
    Path(group_id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HttpError> {
    require_user(&ctx, &headers).await?;
    let group = routes::groups::handle_get_group(ctx, &group_id).await?;
    Ok(Json(group))
}

async fn handle_authorize(
    State(ctx): State<Arc<HostConnectContext>>,
    Path(group_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    let user = require_user(&ctx, &headers).await?;
    let url = routes::stripe::handle_authorize(ctx, &user, &group_id).await?;
    Ok(redirect_found(&url))
}

async fn handle_callback(
    State(ctx): State<Arc<HostConnectContext>>,
    query: Result<Query<routes::stripe::CallbackQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let Query(query) = query?;
    let result = routes::stripe::handle_callback(ctx, query).await?;
    Ok(Json(result))
}
