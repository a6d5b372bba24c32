//! Storage backend implementations.
//!
//! The in-memory backends are always available; SQLite and Elasticsearch are
//! feature-gated.

pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "elasticsearch")]
pub mod elasticsearch;

pub use memory::{MemoryIndex, MemoryStore};

#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteStore, SqliteStoreConfig};

#[cfg(feature = "elasticsearch")]
pub use elasticsearch::{ElasticsearchConfig, ElasticsearchIndex};
