// hostconnect-sqlx: SQL store over `sqlx::AnyPool`.
//
// Supports SQLite and Postgres. Multi-record writes run in one transaction.

pub mod migration;
pub mod store;

pub use migration::{schema_sql, SCHEMA};
pub use store::SqlxStore;
