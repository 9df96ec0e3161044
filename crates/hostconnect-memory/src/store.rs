// In-memory store: HashMap tables behind one `tokio::sync::RwLock`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use hostconnect_core::db::store::{group_not_found, Store, StoreError, StoreResult};
use hostconnect_core::{
    Group, MemberRole, Membership, NewGroup, NewStripeAccount, NewUser, StripeAccount, User,
};

#[derive(Debug, Default, Clone)]
struct Tables {
    users: HashMap<String, User>,
    groups: HashMap<String, Group>,
    memberships: Vec<Membership>,
    stripe_accounts: HashMap<String, StripeAccount>,
}

/// In-memory [`Store`]. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all data.
    pub async fn clear(&self) {
        *self.tables.write().await = Tables::default();
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn group_count(&self) -> usize {
        self.tables.read().await.groups.len()
    }

    pub async fn stripe_account_count(&self) -> usize {
        self.tables.read().await.stripe_accounts.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let user = user.into_user();
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate(format!(
                "User with email {} already exists",
                user.email
            )));
        }
        tables.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let email = email.trim().to_lowercase();
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create_group(
        &self,
        group: NewGroup,
        creator_id: &str,
        role: MemberRole,
    ) -> StoreResult<Group> {
        let group = group.into_group();
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(creator_id) {
            return Err(StoreError::NotFound(format!("User {creator_id} not found")));
        }
        tables
            .memberships
            .push(Membership::new(&group.id, creator_id, role));
        tables.groups.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn find_group_by_id(&self, id: &str) -> StoreResult<Option<Group>> {
        Ok(self.tables.read().await.groups.get(id).cloned())
    }

    async fn list_memberships(&self, group_id: &str) -> StoreResult<Vec<Membership>> {
        Ok(self
            .tables
            .read()
            .await
            .memberships
            .iter()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn link_stripe_account(
        &self,
        group_id: &str,
        account: NewStripeAccount,
    ) -> StoreResult<StripeAccount> {
        let mut tables = self.tables.write().await;
        if !tables.groups.contains_key(group_id) {
            return Err(group_not_found(group_id));
        }

        let account = account.into_account();
        tables
            .stripe_accounts
            .insert(account.id.clone(), account.clone());
        if let Some(group) = tables.groups.get_mut(group_id) {
            group.stripe_account_id = Some(account.id.clone());
            group.updated_at = Utc::now();
        }
        Ok(account)
    }

    async fn find_stripe_account_by_id(&self, id: &str) -> StoreResult<Option<StripeAccount>> {
        Ok(self.tables.read().await.stripe_accounts.get(id).cloned())
    }

    async fn list_stripe_accounts(&self) -> StoreResult<Vec<StripeAccount>> {
        let mut accounts: Vec<_> = self
            .tables
            .read()
            .await
            .stripe_accounts
            .values()
            .cloned()
            .collect();
        accounts.sort_by_key(|a| a.created_at);
        Ok(accounts)
    }

    async fn find_groups_by_stripe_account(&self, account_id: &str) -> StoreResult<Vec<Group>> {
        Ok(self
            .tables
            .read()
            .await
            .groups
            .values()
            .filter(|g| g.stripe_account_id.as_deref() == Some(account_id))
            .cloned()
            .collect())
    }
}
