//! # hostconnect-stripe
//!
//! Stripe Connect standard-account OAuth for host groups.
//!
//! - [`create_authorization_url`] builds the `connect.stripe.com/oauth/authorize`
//!   redirect, carrying the group id as `state`.
//! - [`TokenExchanger`] trades the callback `code` for account credentials;
//!   [`HttpTokenExchanger`] is the reqwest-backed implementation.

pub mod authorization_url;
pub mod code_exchange;
pub mod config;
pub mod error;
pub mod tokens;

pub use authorization_url::create_authorization_url;
pub use code_exchange::{HttpTokenExchanger, TokenExchanger};
pub use config::StripeConnectOptions;
pub use error::StripeError;
pub use tokens::StripeConnectTokens;
