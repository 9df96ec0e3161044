// Group routes: just enough CRUD to create host groups and read them back.

use std::sync::Arc;

use serde::Deserialize;

use hostconnect_core::error::ApiError;
use hostconnect_core::{Group, MemberRole, NewGroup, User};

use crate::context::HostConnectContext;

/// Body of `POST /groups`.
#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub group: NewGroup,
    /// Role granted to the caller in the new group (default `admin`).
    #[serde(default)]
    pub role: Option<MemberRole>,
}

pub async fn handle_create_group(
    ctx: Arc<HostConnectContext>,
    caller: &User,
    body: CreateGroupRequest,
) -> Result<Group, ApiError> {
    if body.group.name.trim().is_empty() {
        return Err(ApiError::bad_request("Group name is required"));
    }

    let role = body.role.unwrap_or_default();
    let group = ctx.store.create_group(body.group, &caller.id, role).await?;

    tracing::info!(
        group_id = %group.id,
        user_id = %caller.id,
        role = %role,
        is_host = group.is_host,
        "group created"
    );
    Ok(group)
}

pub async fn handle_get_group(
    ctx: Arc<HostConnectContext>,
    group_id: &str,
) -> Result<Group, ApiError> {
    ctx.store
        .find_group_by_id(group_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Group {group_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostconnect_core::error::ErrorType;
    use hostconnect_core::{HostConnectOptions, Store};
    use hostconnect_memory::MemoryStore;
    use hostconnect_stripe::StripeConnectOptions;
    use hostconnect_test_utils::{seed_user, StubExchanger, TEST_SECRET};

    fn context(store: MemoryStore) -> Arc<HostConnectContext> {
        HostConnectContext::new(
            HostConnectOptions::new(TEST_SECRET),
            StripeConnectOptions::new("ca_test", "sk_test"),
            Arc::new(store),
            Arc::new(StubExchanger::default()),
        )
    }

    fn request(body: serde_json::Value) -> CreateGroupRequest {
        serde_json::from_value(body).unwrap()
    }

    #[tokio::test]
    async fn creates_host_group_with_requested_role() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "user1@example.com").await;
        let ctx = context(store.clone());

        let group = handle_create_group(
            ctx,
            &user,
            request(serde_json::json!({
                "group": { "name": "Host", "isHost": true },
                "role": "writer"
            })),
        )
        .await
        .unwrap();

        assert!(group.is_host);
        let members = store.list_memberships(&group.id).await.unwrap();
        assert_eq!(members[0].role, MemberRole::Writer);
    }

    #[tokio::test]
    async fn role_defaults_to_admin() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "user1@example.com").await;
        let ctx = context(store.clone());

        let group = handle_create_group(
            ctx,
            &user,
            request(serde_json::json!({ "group": { "name": "Plain" } })),
        )
        .await
        .unwrap();

        assert!(!group.is_host);
        let members = store.list_memberships(&group.id).await.unwrap();
        assert_eq!(members[0].role, MemberRole::Admin);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "user1@example.com").await;
        let ctx = context(store.clone());

        let err = handle_create_group(
            ctx,
            &user,
            request(serde_json::json!({ "group": { "name": "  " } })),
        )
        .await
        .unwrap_err();

        assert_eq!(err, ApiError::bad_request("Group name is required"));
        assert_eq!(store.group_count().await, 0);
    }

    #[tokio::test]
    async fn get_unknown_group_is_not_found() {
        let ctx = context(MemoryStore::new());
        let err = handle_get_group(ctx, "nope").await.unwrap_err();
        assert_eq!(err.kind, ErrorType::NotFound);
        assert_eq!(err.message, "Group nope not found");
    }
}
