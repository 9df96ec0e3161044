// Integration tests for SqlxStore using SQLite in-memory.

use hostconnect_core::{MemberRole, NewGroup, NewStripeAccount, NewUser, Store, StoreError};
use hostconnect_sqlx::{schema_sql, SqlxStore, SCHEMA};

/// Helper: fresh in-memory store with the schema applied.
async fn setup_store() -> SqlxStore {
    let store = SqlxStore::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to SQLite in-memory");
    store.migrate().await.expect("Failed to create schema");
    store
}

fn stripe_credentials() -> NewStripeAccount {
    NewStripeAccount {
        access_token: "sk_test_123".into(),
        refresh_token: "rt_123".into(),
        token_type: "bearer".into(),
        stripe_publishable_key: "pk_test_123".into(),
        stripe_user_id: "acct_123".into(),
        scope: "read_write".into(),
    }
}

#[test]
fn test_printed_schema_lists_every_statement() {
    let script = schema_sql();
    assert_eq!(script.matches("CREATE TABLE IF NOT EXISTS").count(), 4);
    for stmt in SCHEMA {
        assert!(script.contains(&format!("{stmt};")), "missing from script: {stmt}");
    }
}

#[tokio::test]
async fn test_migrate_is_idempotent() {
    let store = setup_store().await;
    store.migrate().await.expect("second migration should be a no-op");
}

#[tokio::test]
async fn test_create_and_find_user() {
    let store = setup_store().await;

    let user = store
        .create_user(NewUser {
            email: "Alice@Example.com".into(),
            name: Some("Alice".into()),
        })
        .await
        .expect("Create user failed");
    assert_eq!(user.email, "alice@example.com");

    let by_id = store.find_user_by_id(&user.id).await.unwrap();
    assert_eq!(by_id.as_ref().map(|u| u.email.as_str()), Some("alice@example.com"));
    assert_eq!(by_id.unwrap().name.as_deref(), Some("Alice"));

    let by_email = store.find_user_by_email("ALICE@example.com").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(user.id));

    assert!(store.find_user_by_id("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email() {
    let store = setup_store().await;
    let new_user = || NewUser {
        email: "dup@example.com".into(),
        name: None,
    };

    store.create_user(new_user()).await.unwrap();
    let err = store.create_user(new_user()).await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate(_)), "got {err:?}");
}

#[tokio::test]
async fn test_create_group_with_membership() {
    let store = setup_store().await;
    let user = store
        .create_user(NewUser {
            email: "host@example.com".into(),
            name: None,
        })
        .await
        .unwrap();

    let group = store
        .create_group(
            NewGroup {
                name: "Host Collective".into(),
                description: Some("fiscal host".into()),
                is_host: true,
                ..Default::default()
            },
            &user.id,
            MemberRole::Admin,
        )
        .await
        .unwrap();

    let found = store.find_group_by_id(&group.id).await.unwrap().unwrap();
    assert!(found.is_host);
    assert_eq!(found.name, "Host Collective");
    assert_eq!(found.description.as_deref(), Some("fiscal host"));
    assert_eq!(found.currency, "USD");
    assert!(found.stripe_account_id.is_none());

    let members = store.list_memberships(&group.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].role, MemberRole::Admin);
    assert_eq!(members[0].user_id, user.id);
}

#[tokio::test]
async fn test_create_group_unknown_creator() {
    let store = setup_store().await;
    let err = store
        .create_group(NewGroup::default(), "ghost", MemberRole::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn test_link_stripe_account() {
    let store = setup_store().await;
    let user = store
        .create_user(NewUser {
            email: "host@example.com".into(),
            name: None,
        })
        .await
        .unwrap();
    let group = store
        .create_group(
            NewGroup {
                name: "Host".into(),
                is_host: true,
                ..Default::default()
            },
            &user.id,
            MemberRole::Admin,
        )
        .await
        .unwrap();

    let account = store
        .link_stripe_account(&group.id, stripe_credentials())
        .await
        .unwrap();

    let accounts = store.list_stripe_accounts().await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].access_token, "sk_test_123");
    assert_eq!(accounts[0].refresh_token, "rt_123");
    assert_eq!(accounts[0].stripe_user_id, "acct_123");

    let linked = store.find_groups_by_stripe_account(&account.id).await.unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, group.id);
    assert_eq!(linked[0].stripe_account_id.as_deref(), Some(account.id.as_str()));
}

#[tokio::test]
async fn test_link_to_missing_group_rolls_back() {
    let store = setup_store().await;

    let err = store
        .link_stripe_account("missing", stripe_credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::NotFound(_)));
    assert!(store.list_stripe_accounts().await.unwrap().is_empty());
}
