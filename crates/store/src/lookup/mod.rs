//! The lookup service: read-through resolution plus coordinated writes over
//! the primary store and the secondary index.

mod coordinator;
mod resolver;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::caller::CallerContext;
use crate::core::{EventPublisher, RecordStore, SearchIndex};
use crate::error::StoreResult;
use crate::types::{EntityKind, LookupRecord, PageRequest, PagedRecords};

pub use coordinator::Coordinator;
pub use resolver::Resolver;

use crate::core::ListFilter;

/// The result of a list operation.
///
/// Only index-served lists carry pagination metadata; a primary-store
/// fallback returns the full filtered set without totals, and the transport
/// layer must not attach pagination headers to it.
#[derive(Debug, Clone, PartialEq)]
pub enum ListOutcome {
    /// Served by the search index, with offset pagination and totals.
    Indexed(PagedRecords),
    /// Served by a primary-store scan after an index failure.
    Fallback(Vec<LookupRecord>),
}

/// The façade combining the read and write paths over one store/index pair.
///
/// Built once at startup with injected backends and shared behind an `Arc`.
pub struct LookupService {
    resolver: Resolver,
    coordinator: Coordinator,
}

impl LookupService {
    /// Creates a service over the given backends.
    pub fn new(
        store: Arc<dyn RecordStore>,
        index: Arc<dyn SearchIndex>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            resolver: Resolver::new(Arc::clone(&store), Arc::clone(&index)),
            coordinator: Coordinator::new(store, index, events),
        }
    }

    /// Reads one record, index-first. See [`Resolver::fetch`].
    pub async fn fetch(
        &self,
        entity: EntityKind,
        id: &str,
        caller: &CallerContext,
    ) -> StoreResult<LookupRecord> {
        self.resolver.fetch(entity, id, caller).await
    }

    /// Lists records, index-first with primary fallback. See
    /// [`Resolver::list`].
    pub async fn list(
        &self,
        entity: EntityKind,
        filters: &ListFilter,
        page: PageRequest,
        caller: &CallerContext,
    ) -> StoreResult<ListOutcome> {
        self.resolver.list(entity, filters, page, caller).await
    }

    /// Creates a record. See [`Coordinator::create`].
    pub async fn create(
        &self,
        entity: EntityKind,
        fields: Map<String, Value>,
        caller: &CallerContext,
    ) -> StoreResult<LookupRecord> {
        self.coordinator.create(entity, fields, caller).await
    }

    /// Replaces a record's fields in full. See [`Coordinator::replace`].
    pub async fn replace(
        &self,
        entity: EntityKind,
        id: &str,
        fields: Map<String, Value>,
        caller: &CallerContext,
    ) -> StoreResult<LookupRecord> {
        self.coordinator.replace(entity, id, fields, caller).await
    }

    /// Merges partial fields into a record. See [`Coordinator::patch`].
    pub async fn patch(
        &self,
        entity: EntityKind,
        id: &str,
        fields: Map<String, Value>,
        caller: &CallerContext,
    ) -> StoreResult<LookupRecord> {
        self.coordinator.patch(entity, id, fields, caller).await
    }

    /// Soft-deletes or destroys a record. See [`Coordinator::remove`].
    pub async fn remove(
        &self,
        entity: EntityKind,
        id: &str,
        destroy: bool,
        caller: &CallerContext,
    ) -> StoreResult<()> {
        self.coordinator.remove(entity, id, destroy, caller).await
    }
}
