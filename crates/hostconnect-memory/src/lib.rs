// hostconnect-memory: in-memory store.
//
// Keeps every table in a single `RwLock`, so multi-record writes are atomic.
// Used by tests and by `hostconnect serve` when `database.url` (or
// `DATABASE_URL`) is `memory`.

pub mod store;

pub use store::MemoryStore;
