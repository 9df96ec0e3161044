// Fixtures shared by route and HTTP tests.

use hostconnect_core::{Group, MemberRole, NewGroup, NewUser, Store, User};
use hostconnect_stripe::StripeConnectTokens;

/// A secret long enough to pass option validation.
pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-32";

/// The token reply used throughout the callback tests.
pub fn stripe_reply() -> StripeConnectTokens {
    StripeConnectTokens {
        access_token: "sk_test_123".into(),
        refresh_token: "rt_123".into(),
        token_type: "bearer".into(),
        stripe_publishable_key: "pk_test_123".into(),
        stripe_user_id: "acct_123".into(),
        scope: "read_write".into(),
        livemode: None,
    }
}

pub async fn seed_user(store: &dyn Store, email: &str) -> User {
    store
        .create_user(NewUser {
            email: email.to_string(),
            name: None,
        })
        .await
        .expect("seed user")
}

/// Create a group owned by `owner` (as admin).
pub async fn seed_group(store: &dyn Store, owner: &User, name: &str, is_host: bool) -> Group {
    store
        .create_group(
            NewGroup {
                name: name.to_string(),
                is_host,
                ..Default::default()
            },
            &owner.id,
            MemberRole::Admin,
        )
        .await
        .expect("seed group")
}
