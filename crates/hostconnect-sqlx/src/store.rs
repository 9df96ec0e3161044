// SqlxStore: `Store` implementation over `sqlx::AnyPool`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::{AnyPool, Row};

use hostconnect_core::db::store::{group_not_found, Store, StoreError, StoreResult};
use hostconnect_core::error::HostConnectError;
use hostconnect_core::{
    Group, MemberRole, Membership, NewGroup, NewStripeAccount, NewUser, StripeAccount, User,
};

use crate::migration::SCHEMA;

const GROUP_COLUMNS: &str =
    "id, name, description, currency, is_host, stripe_account_id, created_at, updated_at";
const ACCOUNT_COLUMNS: &str = "id, access_token, refresh_token, token_type, \
     stripe_publishable_key, stripe_user_id, scope, created_at, updated_at";

/// SQL-backed store.
#[derive(Debug, Clone)]
pub struct SqlxStore {
    pool: AnyPool,
}

impl SqlxStore {
    /// Connect to a database URL (`sqlite:...` or `postgres://...`).
    pub async fn connect(url: &str) -> Result<Self, HostConnectError> {
        sqlx::any::install_default_drivers();

        // Every connection to an in-memory SQLite url is a separate database.
        let pool = if url.contains(":memory:") || url.contains("mode=memory") {
            AnyPoolOptions::new().max_connections(1).connect(url).await
        } else {
            AnyPool::connect(url).await
        }
        .map_err(|e| HostConnectError::Database(format!("Database connection failed: {e}")))?;

        Ok(Self { pool })
    }

    /// Create missing tables and indexes.
    pub async fn migrate(&self) -> Result<(), HostConnectError> {
        for stmt in SCHEMA {
            sqlx::query(stmt)
                .execute(&self.pool)
                .await
                .map_err(|e| HostConnectError::Database(format!("Migration failed: {e}")))?;
        }
        tracing::info!(statements = SCHEMA.len(), "schema up to date");
        Ok(())
    }
}

fn db_err(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Duplicate(db.message().to_string())
        }
        _ => StoreError::Database(e.to_string()),
    }
}

fn parse_time(row: &AnyRow, column: &str) -> StoreResult<DateTime<Utc>> {
    let raw: String = row.try_get(column).map_err(db_err)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Serialization(format!("{column}: {e}")))
}

fn to_text(t: &DateTime<Utc>) -> String {
    t.to_rfc3339()
}

fn row_to_user(row: &AnyRow) -> StoreResult<User> {
    Ok(User {
        id: row.try_get("id").map_err(db_err)?,
        email: row.try_get("email").map_err(db_err)?,
        name: row.try_get("name").map_err(db_err)?,
        created_at: parse_time(row, "created_at")?,
        updated_at: parse_time(row, "updated_at")?,
    })
}

fn row_to_group(row: &AnyRow) -> StoreResult<Group> {
    let is_host: i64 = row.try_get("is_host").map_err(db_err)?;
    Ok(Group {
        id: row.try_get("id").map_err(db_err)?,
        name: row.try_get("name").map_err(db_err)?,
        description: row.try_get("description").map_err(db_err)?,
        currency: row.try_get("currency").map_err(db_err)?,
        is_host: is_host != 0,
        stripe_account_id: row.try_get("stripe_account_id").map_err(db_err)?,
        created_at: parse_time(row, "created_at")?,
        updated_at: parse_time(row, "updated_at")?,
    })
}

fn row_to_membership(row: &AnyRow) -> StoreResult<Membership> {
    let role: String = row.try_get("role").map_err(db_err)?;
    Ok(Membership {
        id: row.try_get("id").map_err(db_err)?,
        group_id: row.try_get("group_id").map_err(db_err)?,
        user_id: row.try_get("user_id").map_err(db_err)?,
        role: role.parse().map_err(StoreError::Serialization)?,
        created_at: parse_time(row, "created_at")?,
    })
}

fn row_to_account(row: &AnyRow) -> StoreResult<StripeAccount> {
    Ok(StripeAccount {
        id: row.try_get("id").map_err(db_err)?,
        access_token: row.try_get("access_token").map_err(db_err)?,
        refresh_token: row.try_get("refresh_token").map_err(db_err)?,
        token_type: row.try_get("token_type").map_err(db_err)?,
        stripe_publishable_key: row.try_get("stripe_publishable_key").map_err(db_err)?,
        stripe_user_id: row.try_get("stripe_user_id").map_err(db_err)?,
        scope: row.try_get("scope").map_err(db_err)?,
        created_at: parse_time(row, "created_at")?,
        updated_at: parse_time(row, "updated_at")?,
    })
}

#[async_trait]
impl Store for SqlxStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let user = user.into_user();
        sqlx::query(
            "INSERT INTO users (id, email, name, created_at, updated_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id.clone())
        .bind(user.email.clone())
        .bind(user.name.clone())
        .bind(to_text(&user.created_at))
        .bind(to_text(&user.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| match db_err(e) {
            StoreError::Duplicate(_) => {
                StoreError::Duplicate(format!("User with email {} already exists", user.email))
            }
            other => other,
        })?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query("SELECT id, email, name, created_at, updated_at FROM users WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row =
            sqlx::query("SELECT id, email, name, created_at, updated_at FROM users WHERE email = $1")
                .bind(email.trim().to_lowercase())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn create_group(
        &self,
        group: NewGroup,
        creator_id: &str,
        role: MemberRole,
    ) -> StoreResult<Group> {
        let group = group.into_group();
        let membership = Membership::new(&group.id, creator_id, role);

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let creator = sqlx::query("SELECT id FROM users WHERE id = $1")
            .bind(creator_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?;
        if creator.is_none() {
            return Err(StoreError::NotFound(format!("User {creator_id} not found")));
        }

        sqlx::query(&format!(
            "INSERT INTO groups ({GROUP_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
        ))
        .bind(group.id.clone())
        .bind(group.name.clone())
        .bind(group.description.clone())
        .bind(group.currency.clone())
        .bind(i64::from(group.is_host))
        .bind(group.stripe_account_id.clone())
        .bind(to_text(&group.created_at))
        .bind(to_text(&group.updated_at))
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        sqlx::query(
            "INSERT INTO memberships (id, group_id, user_id, role, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(membership.id.clone())
        .bind(membership.group_id.clone())
        .bind(membership.user_id.clone())
        .bind(membership.role.as_str().to_string())
        .bind(to_text(&membership.created_at))
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(group)
    }

    async fn find_group_by_id(&self, id: &str) -> StoreResult<Option<Group>> {
        let row = sqlx::query(&format!("SELECT {GROUP_COLUMNS} FROM groups WHERE id = $1"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(row_to_group).transpose()
    }

    async fn list_memberships(&self, group_id: &str) -> StoreResult<Vec<Membership>> {
        let rows = sqlx::query(
            "SELECT id, group_id, user_id, role, created_at FROM memberships \
             WHERE group_id = $1 ORDER BY created_at",
        )
        .bind(group_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.iter().map(row_to_membership).collect()
    }

    async fn link_stripe_account(
        &self,
        group_id: &str,
        account: NewStripeAccount,
    ) -> StoreResult<StripeAccount> {
        let account = account.into_account();

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query(&format!(
            "INSERT INTO stripe_accounts ({ACCOUNT_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        ))
        .bind(account.id.clone())
        .bind(account.access_token.clone())
        .bind(account.refresh_token.clone())
        .bind(account.token_type.clone())
        .bind(account.stripe_publishable_key.clone())
        .bind(account.stripe_user_id.clone())
        .bind(account.scope.clone())
        .bind(to_text(&account.created_at))
        .bind(to_text(&account.updated_at))
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        let updated = sqlx::query(
            "UPDATE groups SET stripe_account_id = $1, updated_at = $2 WHERE id = $3",
        )
        .bind(account.id.clone())
        .bind(to_text(&Utc::now()))
        .bind(group_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        if updated.rows_affected() == 0 {
            tx.rollback().await.map_err(db_err)?;
            return Err(group_not_found(group_id));
        }

        tx.commit().await.map_err(db_err)?;
        Ok(account)
    }

    async fn find_stripe_account_by_id(&self, id: &str) -> StoreResult<Option<StripeAccount>> {
        let row = sqlx::query(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM stripe_accounts WHERE id = $1"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.as_ref().map(row_to_account).transpose()
    }

    async fn list_stripe_accounts(&self) -> StoreResult<Vec<StripeAccount>> {
        let rows = sqlx::query(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM stripe_accounts ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.iter().map(row_to_account).collect()
    }

    async fn find_groups_by_stripe_account(&self, account_id: &str) -> StoreResult<Vec<Group>> {
        let rows = sqlx::query(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE stripe_account_id = $1"
        ))
        .bind(account_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.iter().map(row_to_group).collect()
    }
}
