// Stripe Connect onboarding for host groups.
//
// 1. GET /groups/{groupId}/stripe/authorize: redirect to Stripe with state = group id
// 2. GET /stripe/oauth/callback?state=..&code=..: exchange the code, store the
//    credentials and link them to the group
//
// Every check in the callback runs before the token exchange, and the only
// write is the final atomic `link_stripe_account`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use hostconnect_core::error::{ApiError, ErrorType};
use hostconnect_core::{NewStripeAccount, User};
use hostconnect_stripe::create_authorization_url;

use crate::context::HostConnectContext;

pub const GROUP_NOT_HOST: &str = "Group is not a host.";
pub const GROUP_DOES_NOT_EXIST: &str = "Group does not exist";
pub const MISSING_CODE: &str = "Missing authorization code";

/// Returns the Stripe authorize URL for a host group.
pub async fn handle_authorize(
    ctx: Arc<HostConnectContext>,
    caller: &User,
    group_id: &str,
) -> Result<String, ApiError> {
    let group = ctx
        .store
        .find_group_by_id(group_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Group {group_id} not found")))?;

    if !group.is_host {
        tracing::warn!(group_id = %group.id, user_id = %caller.id, "authorize refused: not a host");
        return Err(ApiError::bad_request(GROUP_NOT_HOST));
    }

    let url = create_authorization_url(&ctx.stripe, &group.id)?;

    tracing::info!(group_id = %group.id, user_id = %caller.id, "redirecting to Stripe Connect");
    Ok(url.into())
}

/// Query parameters Stripe sends back to the callback.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    pub state: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackResponse {
    pub success: bool,
    pub group_id: String,
    pub stripe_account_id: String,
    pub stripe_user_id: String,
}

/// The value as sent, unless it is missing or blank.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn handle_callback(
    ctx: Arc<HostConnectContext>,
    query: CallbackQuery,
) -> Result<CallbackResponse, ApiError> {
    let state = non_empty(query.state.as_deref()).ok_or_else(|| ApiError::new(ErrorType::BadRequest))?;

    if let Some(error) = non_empty(query.error.as_deref()) {
        let message = non_empty(query.error_description.as_deref()).unwrap_or(error);
        tracing::warn!(group_id = %state, error = %error, "Stripe authorization denied");
        return Err(ApiError::bad_request(message));
    }

    let group = ctx
        .store
        .find_group_by_id(state)
        .await?
        .ok_or_else(|| ApiError::bad_request(GROUP_DOES_NOT_EXIST))?;

    let code = non_empty(query.code.as_deref()).ok_or_else(|| ApiError::bad_request(MISSING_CODE))?;

    let tokens = ctx.token_exchanger.exchange_code(code).await.map_err(|e| {
        tracing::error!(group_id = %group.id, error = %e, code = e.code(), "Stripe token exchange failed");
        ApiError::from(e)
    })?;

    let account = ctx
        .store
        .link_stripe_account(&group.id, NewStripeAccount::from(tokens))
        .await
        .map_err(|e| {
            // The group was resolved above; losing it now is a race, not a bad request.
            tracing::error!(group_id = %group.id, error = %e, "failed to persist Stripe account");
            ApiError::internal()
        })?;

    tracing::info!(
        group_id = %group.id,
        stripe_account_id = %account.id,
        stripe_user_id = %account.stripe_user_id,
        "Stripe account linked"
    );

    Ok(CallbackResponse {
        success: true,
        group_id: group.id,
        stripe_account_id: account.id,
        stripe_user_id: account.stripe_user_id,
    })
}
