//! SQLite primary-store backend.

mod backend;

pub use backend::{SqliteStore, SqliteStoreConfig};
