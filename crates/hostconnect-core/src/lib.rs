//! Core building blocks shared by every hostconnect crate: the domain models,
//! the [`Store`] persistence trait, the error taxonomy and configuration.

pub mod db;
pub mod env;
pub mod error;
pub mod options;
pub mod utils;

// Re-exports for convenience
pub use db::models::{
    Group, MemberRole, Membership, NewGroup, NewStripeAccount, NewUser, StripeAccount, User,
};
pub use db::store::{Store, StoreError, StoreResult};
pub use error::{ApiError, ErrorType, HostConnectError, HttpStatus};
pub use options::HostConnectOptions;
