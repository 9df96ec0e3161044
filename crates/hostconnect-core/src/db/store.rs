// Store trait: the persistence seam every backend implements.
//
// Methods are typed and operation-shaped rather than a generic query API: the
// service only ever needs these lookups, and `link_stripe_account` must be
// atomic in every backend.

use async_trait::async_trait;

use crate::db::models::{
    Group, MemberRole, Membership, NewGroup, NewStripeAccount, NewUser, StripeAccount, User,
};

/// Errors raised by store backends.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("database error: {0}")]
    Database(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    // ─── Users ───────────────────────────────────────────────────

    /// Create a user. Fails with `Duplicate` when the email is taken.
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;

    async fn find_user_by_id(&self, id: &str) -> StoreResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    // ─── Groups ──────────────────────────────────────────────────

    /// Create a group together with the creator's membership.
    async fn create_group(
        &self,
        group: NewGroup,
        creator_id: &str,
        role: MemberRole,
    ) -> StoreResult<Group>;

    async fn find_group_by_id(&self, id: &str) -> StoreResult<Option<Group>>;

    async fn list_memberships(&self, group_id: &str) -> StoreResult<Vec<Membership>>;

    // ─── Stripe accounts ─────────────────────────────────────────

    /// Create a Stripe account record and point the group at it.
    ///
    /// Both writes happen atomically. Fails with `NotFound` (and writes
    /// nothing) when the group does not exist.
    async fn link_stripe_account(
        &self,
        group_id: &str,
        account: NewStripeAccount,
    ) -> StoreResult<StripeAccount>;

    async fn find_stripe_account_by_id(&self, id: &str) -> StoreResult<Option<StripeAccount>>;

    async fn list_stripe_accounts(&self) -> StoreResult<Vec<StripeAccount>>;

    /// Groups whose `stripe_account_id` equals `account_id`.
    async fn find_groups_by_stripe_account(&self, account_id: &str) -> StoreResult<Vec<Group>>;
}

/// The `NotFound` error every backend returns for an unknown group id.
pub fn group_not_found(id: &str) -> StoreError {
    StoreError::NotFound(format!("Group {id} not found"))
}
