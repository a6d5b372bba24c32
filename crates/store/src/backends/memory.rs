//! In-memory backends.
//!
//! Used for tests and for running the API without external services. Both
//! backends keep records in a `BTreeMap` keyed by id, so scans and lists are
//! deterministically ordered.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::core::{IndexNamespace, ListFilter, RecordStore, SearchIndex};
use crate::error::{RecordError, StoreResult};
use crate::types::{EntityKind, LookupRecord, PageRequest, PagedRecords};

/// In-memory primary store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<EntityKind, BTreeMap<String, LookupRecord>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get_by_id(&self, entity: EntityKind, id: &str) -> StoreResult<Option<LookupRecord>> {
        let tables = self.tables.read();
        Ok(tables.get(&entity).and_then(|table| table.get(id)).cloned())
    }

    async fn put(&self, entity: EntityKind, record: &LookupRecord) -> StoreResult<()> {
        let mut tables = self.tables.write();
        tables
            .entry(entity)
            .or_default()
            .insert(record.id().to_string(), record.clone());
        Ok(())
    }

    async fn update(
        &self,
        entity: EntityKind,
        id: &str,
        fields: &Map<String, Value>,
    ) -> StoreResult<LookupRecord> {
        let mut tables = self.tables.write();
        let record = tables
            .entry(entity)
            .or_default()
            .get_mut(id)
            .ok_or_else(|| RecordError::NotFound {
                entity,
                id: id.to_string(),
            })?;
        record.merge(fields);
        Ok(record.clone())
    }

    async fn delete(&self, entity: EntityKind, id: &str) -> StoreResult<()> {
        let mut tables = self.tables.write();
        tables
            .entry(entity)
            .or_default()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| {
                RecordError::NotFound {
                    entity,
                    id: id.to_string(),
                }
                .into()
            })
    }

    async fn scan(&self, entity: EntityKind) -> StoreResult<Vec<LookupRecord>> {
        let tables = self.tables.read();
        Ok(tables
            .get(&entity)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default())
    }
}

/// In-memory search index.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    indices: RwLock<HashMap<&'static str, BTreeMap<String, LookupRecord>>>,
}

impl MemoryIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SearchIndex for MemoryIndex {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get_by_id(&self, ns: IndexNamespace, id: &str) -> StoreResult<Option<LookupRecord>> {
        let indices = self.indices.read();
        Ok(indices
            .get(ns.index())
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn index(&self, ns: IndexNamespace, record: &LookupRecord) -> StoreResult<()> {
        let mut indices = self.indices.write();
        indices
            .entry(ns.index())
            .or_default()
            .insert(record.id().to_string(), record.clone());
        Ok(())
    }

    async fn delete(&self, ns: IndexNamespace, id: &str) -> StoreResult<()> {
        let mut indices = self.indices.write();
        if let Some(docs) = indices.get_mut(ns.index()) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn list(
        &self,
        ns: IndexNamespace,
        filters: &ListFilter,
        page: PageRequest,
    ) -> StoreResult<PagedRecords> {
        let indices = self.indices.read();
        let matched: Vec<LookupRecord> = indices
            .get(ns.index())
            .map(|docs| {
                docs.values()
                    .filter(|record| matches(record, filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect();
        Ok(PagedRecords {
            items,
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }
}

fn matches(record: &LookupRecord, filters: &ListFilter) -> bool {
    filters.iter().all(|(field, expected)| {
        record
            .field(field)
            .and_then(Value::as_str)
            .is_some_and(|value| value == expected)
    })
}
