//! The primary record store trait.
//!
//! The primary store is the durable, strongly-consistent source of truth for
//! lookup records. All mutations go here first; the secondary index only ever
//! mirrors what this store holds.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreResult;
use crate::types::{EntityKind, LookupRecord};

/// Durable key-value storage of lookup records, keyed by record id within an
/// entity's table.
///
/// # Consistency
///
/// Implementations must be authoritative: a successful `put`/`update`/`delete`
/// is durable, and `get_by_id` observes all prior successful writes. The
/// read-through resolver relies on this when the secondary index misses or
/// fails.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// A human-readable name for this backend, used in logs.
    fn backend_name(&self) -> &'static str;

    /// Reads a record by id. Returns `None` when the id is absent.
    ///
    /// Soft-deleted records are still returned; visibility is decided by the
    /// caller-facing policy, not by the store.
    async fn get_by_id(&self, entity: EntityKind, id: &str) -> StoreResult<Option<LookupRecord>>;

    /// Writes a full record, replacing any existing record with the same id.
    async fn put(&self, entity: EntityKind, record: &LookupRecord) -> StoreResult<()>;

    /// Merges partial fields into an existing record and returns the updated
    /// record.
    ///
    /// # Errors
    ///
    /// * `RecordError::NotFound` - if no record with `id` exists
    async fn update(
        &self,
        entity: EntityKind,
        id: &str,
        fields: &Map<String, Value>,
    ) -> StoreResult<LookupRecord>;

    /// Physically removes a record.
    ///
    /// # Errors
    ///
    /// * `RecordError::NotFound` - if no record with `id` exists
    async fn delete(&self, entity: EntityKind, id: &str) -> StoreResult<()>;

    /// Returns every record of an entity type, soft-deleted ones included.
    ///
    /// Used by the primary-store list fallback and by maintenance scripts;
    /// never by the single-record read path.
    async fn scan(&self, entity: EntityKind) -> StoreResult<Vec<LookupRecord>>;

    /// Checks whether a record exists.
    async fn exists(&self, entity: EntityKind, id: &str) -> StoreResult<bool> {
        Ok(self.get_by_id(entity, id).await?.is_some())
    }
}
