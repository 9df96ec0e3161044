//! Framework-independent request handling for hostconnect.
//!
//! Route functions take an [`Arc<HostConnectContext>`](context::HostConnectContext)
//! plus already-extracted inputs and return `Result<_, ApiError>`; the HTTP
//! integration crates only translate requests and responses.

pub mod auth;
pub mod context;
pub mod routes;

pub use context::HostConnectContext;
