//! The read-through resolver.
//!
//! Reads try the search index first and fall back to the primary store. The
//! index is advisory: any index error is logged and treated as a miss, never
//! surfaced to the caller. A record the index *does* return is authoritative
//! for visibility, so a soft-deleted index hit becomes a not-found outcome
//! without a primary consult.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::caller::CallerContext;
use crate::core::{ListFilter, RecordStore, SearchIndex};
use crate::error::{RecordError, StoreResult};
use crate::lookup::ListOutcome;
use crate::types::{EntityKind, LookupRecord, PageRequest, PagedRecords};
use crate::visibility::{self, Visibility};

/// Index-first reads with primary-store fallback.
pub struct Resolver {
    store: Arc<dyn RecordStore>,
    index: Arc<dyn SearchIndex>,
}

impl Resolver {
    /// Creates a resolver over the given backends.
    pub fn new(store: Arc<dyn RecordStore>, index: Arc<dyn SearchIndex>) -> Self {
        Self { store, index }
    }

    /// Reads the record with the given id, shaped for `caller`.
    ///
    /// # Errors
    ///
    /// * `AccessError::SoftDeleteVisibility` - if a non-administrator
    ///   requested soft-deleted visibility; no backend is consulted
    /// * `RecordError::NotFound` - if the id is absent, or the record is
    ///   soft-deleted and hidden from this caller
    /// * `BackendError` - if the primary store fails
    pub async fn fetch(
        &self,
        entity: EntityKind,
        id: &str,
        caller: &CallerContext,
    ) -> StoreResult<LookupRecord> {
        caller.ensure_soft_delete_access()?;

        let ns = entity.namespace();
        match self.index.get_by_id(ns, id).await {
            Ok(Some(record)) => {
                debug!(entity = %entity, id, backend = self.index.backend_name(), "Index hit");
                return match visibility::resolve(record, caller) {
                    Visibility::Visible(record) => Ok(record),
                    // The hit proves the record exists and is soft-deleted;
                    // the primary store cannot say otherwise.
                    Visibility::Hidden => Err(not_found(entity, id)),
                };
            }
            Ok(None) => {
                debug!(entity = %entity, id, "Index miss, falling back to primary store");
            }
            Err(error) => {
                warn!(
                    entity = %entity,
                    id,
                    backend = self.index.backend_name(),
                    %error,
                    "Index read failed, falling back to primary store"
                );
            }
        }

        let record = self
            .store
            .get_by_id(entity, id)
            .await?
            .ok_or_else(|| not_found(entity, id))?;
        visibility::resolve(record, caller)
            .into_record()
            .ok_or_else(|| not_found(entity, id))
    }

    /// Lists records matching `filters`, shaped for `caller`.
    ///
    /// The index serves the page and the total hit count; records the caller
    /// may not see are dropped from the page after the fact. When the index
    /// fails, the whole entity table is scanned from the primary store and
    /// filtered in memory, with no pagination metadata.
    pub async fn list(
        &self,
        entity: EntityKind,
        filters: &ListFilter,
        page: PageRequest,
        caller: &CallerContext,
    ) -> StoreResult<ListOutcome> {
        caller.ensure_soft_delete_access()?;

        let ns = entity.namespace();
        match self.index.list(ns, filters, page).await {
            Ok(paged) => {
                let shaped = PagedRecords {
                    items: shape_items(paged.items, caller),
                    page: paged.page,
                    per_page: paged.per_page,
                    total: paged.total,
                };
                Ok(ListOutcome::Indexed(shaped))
            }
            Err(error) => {
                warn!(
                    entity = %entity,
                    backend = self.index.backend_name(),
                    %error,
                    "Index list failed, scanning primary store"
                );
                let records = self.store.scan(entity).await?;
                let matched = records
                    .into_iter()
                    .filter(|record| matches_filters(record, filters))
                    .collect();
                Ok(ListOutcome::Fallback(shape_items(matched, caller)))
            }
        }
    }
}

fn not_found(entity: EntityKind, id: &str) -> crate::error::StoreError {
    RecordError::NotFound {
        entity,
        id: id.to_string(),
    }
    .into()
}

/// Applies the visibility policy to each record, dropping hidden ones.
fn shape_items(items: Vec<LookupRecord>, caller: &CallerContext) -> Vec<LookupRecord> {
    items
        .into_iter()
        .filter_map(|record| visibility::resolve(record, caller).into_record())
        .collect()
}

/// Exact string-equality match on every filter field.
fn matches_filters(record: &LookupRecord, filters: &ListFilter) -> bool {
    filters.iter().all(|(field, expected)| {
        record
            .field(field)
            .and_then(|value| value.as_str())
            .is_some_and(|value| value == expected)
    })
}
