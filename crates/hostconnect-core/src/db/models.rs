// Persisted records: users, groups, memberships and linked Stripe accounts.
//
// All records serialize in camelCase, which is also the wire format of the API.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::generate_id;

/// Default currency for new groups.
pub const DEFAULT_CURRENCY: &str = "USD";

/// An authenticated principal. Bearer tokens carry the user id as subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for [`crate::Store::create_user`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl NewUser {
    pub fn into_user(self) -> User {
        let now = Utc::now();
        User {
            id: generate_id(),
            email: self.email.trim().to_lowercase(),
            name: self.name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A group. Only host groups may link a Stripe account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub currency: String,
    pub is_host: bool,
    /// Id of the linked [`StripeAccount`], if any.
    pub stripe_account_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for [`crate::Store::create_group`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub is_host: bool,
}

impl NewGroup {
    pub fn into_group(self) -> Group {
        let now = Utc::now();
        Group {
            id: generate_id(),
            name: self.name.trim().to_string(),
            description: self.description,
            currency: self
                .currency
                .map(|c| c.to_uppercase())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            is_host: self.is_host,
            stripe_account_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Role of a user within a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    #[default]
    Admin,
    Writer,
    Viewer,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Writer => "writer",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "writer" => Ok(Self::Writer),
            "viewer" => Ok(Self::Viewer),
            other => Err(format!("unknown member role: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: String,
    pub group_id: String,
    pub user_id: String,
    pub role: MemberRole,
    pub created_at: DateTime<Utc>,
}

impl Membership {
    pub fn new(group_id: impl Into<String>, user_id: impl Into<String>, role: MemberRole) -> Self {
        Self {
            id: generate_id(),
            group_id: group_id.into(),
            user_id: user_id.into(),
            role,
            created_at: Utc::now(),
        }
    }
}

/// Credentials returned by the Stripe Connect token exchange.
///
/// Created once per successful OAuth callback and never updated.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeAccount {
    pub id: String,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub stripe_publishable_key: String,
    pub stripe_user_id: String,
    pub scope: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Tokens stay out of logs.
impl fmt::Debug for StripeAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeAccount")
            .field("id", &self.id)
            .field("token_type", &self.token_type)
            .field("stripe_publishable_key", &self.stripe_publishable_key)
            .field("stripe_user_id", &self.stripe_user_id)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// Input for [`crate::Store::link_stripe_account`].
#[derive(Clone, PartialEq, Eq)]
pub struct NewStripeAccount {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub stripe_publishable_key: String,
    pub stripe_user_id: String,
    pub scope: String,
}

impl fmt::Debug for NewStripeAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewStripeAccount")
            .field("stripe_user_id", &self.stripe_user_id)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl NewStripeAccount {
    pub fn into_account(self) -> StripeAccount {
        let now = Utc::now();
        StripeAccount {
            id: generate_id(),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: self.token_type,
            stripe_publishable_key: self.stripe_publishable_key,
            stripe_user_id: self.stripe_user_id,
            scope: self.scope,
            created_at: now,
            updated_at: now,
        }
    }
}
