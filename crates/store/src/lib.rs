//! Lookup Tables Persistence Layer
//!
//! This crate provides the dual-store persistence core behind the lookup
//! tables API: a durable primary key-value store paired with a secondary
//! search index that acts as an eventually-consistent read accelerator.
//!
//! # Consistency model
//!
//! - **Writes** go to the primary store first; only a successful primary
//!   write is mirrored into the index, best-effort. A failed mirror is
//!   logged and the write still succeeds.
//! - **Reads** try the index first. Index errors are absorbed and the read
//!   falls back to the primary store. A record the index does return is
//!   authoritative for visibility: a soft-deleted hit becomes a not-found
//!   outcome without a primary consult.
//! - **Lists** are served by the index with offset pagination and totals;
//!   when the index fails, the primary table is scanned and the result
//!   carries no pagination metadata.
//!
//! # Backend Features
//!
//! Enable backends with feature flags in `Cargo.toml`:
//!
//! - `sqlite` (default) - SQLite primary store with in-memory and file modes
//! - `elasticsearch` - Elasticsearch secondary index
//!
//! The in-memory backends are always available and back the test suite.
//!
//! # Architecture
//!
//! - [`types`] - Records, entity kinds, and pagination types
//! - [`error`] - Error types for all operations
//! - [`caller`] - Caller privilege and visibility flags
//! - [`visibility`] - The soft-delete visibility policy
//! - [`core`] - The [`core::RecordStore`], [`core::SearchIndex`], and
//!   [`core::EventPublisher`] traits
//! - [`lookup`] - The read-through resolver and write coordinator
//! - [`backends`] - Backend implementations
//! - [`maintenance`] - Purge tooling
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use serde_json::Map;
//! use lookup_store::backends::{MemoryIndex, MemoryStore};
//! use lookup_store::caller::CallerContext;
//! use lookup_store::core::TracingPublisher;
//! use lookup_store::lookup::LookupService;
//! use lookup_store::types::EntityKind;
//!
//! # async fn run() -> lookup_store::error::StoreResult<()> {
//! let service = LookupService::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(MemoryIndex::new()),
//!     Arc::new(TracingPublisher),
//! );
//!
//! let admin = CallerContext::new(true);
//! let mut fields = Map::new();
//! fields.insert("name".to_string(), "Chile".into());
//! fields.insert("countryCode".to_string(), "CL".into());
//! let record = service.create(EntityKind::Country, fields, &admin).await?;
//!
//! let fetched = service
//!     .fetch(EntityKind::Country, record.id(), &CallerContext::new(false))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod backends;
pub mod caller;
pub mod core;
pub mod error;
pub mod lookup;
pub mod maintenance;
pub mod types;
pub mod visibility;

pub use caller::{CallerContext, ADMIN_ROLE};
pub use error::{StoreError, StoreResult};
pub use lookup::{ListOutcome, LookupService};
pub use types::{EntityKind, LookupRecord, PageRequest, PagedRecords};
