//! The secondary search index trait.
//!
//! The index is an eventually-consistent read accelerator. It is never
//! authoritative for existence: absence or failure here must fall back to the
//! primary store before a not-found outcome is reported.

use std::fmt;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{LookupRecord, PageRequest, PagedRecords};

/// The index + document-type pair addressing one entity's documents.
///
/// Namespaces are resolved from the static entity-type table
/// ([`crate::types::EntityKind::namespace`]), never at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexNamespace {
    index: &'static str,
    doc_type: &'static str,
}

impl IndexNamespace {
    /// Creates a namespace from static index and document-type names.
    pub const fn new(index: &'static str, doc_type: &'static str) -> Self {
        Self { index, doc_type }
    }

    /// The index name.
    pub fn index(&self) -> &'static str {
        self.index
    }

    /// The document type within the index.
    pub fn doc_type(&self) -> &'static str {
        self.doc_type
    }
}

impl fmt::Display for IndexNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index, self.doc_type)
    }
}

/// An exact-match field filter for listing.
pub type ListFilter = Vec<(String, String)>;

/// Fast point-lookup and listing over mirrored lookup records.
///
/// All methods may fail transiently; callers treat any error as a cache miss
/// and fall back to the primary store.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// A human-readable name for this index backend, used in logs.
    fn backend_name(&self) -> &'static str;

    /// Reads the document with the given id, if present.
    async fn get_by_id(&self, ns: IndexNamespace, id: &str) -> StoreResult<Option<LookupRecord>>;

    /// Indexes (creates or replaces) the document for a record, keyed by the
    /// record id.
    async fn index(&self, ns: IndexNamespace, record: &LookupRecord) -> StoreResult<()>;

    /// Removes the document with the given id. Removing an absent document is
    /// not an error.
    async fn delete(&self, ns: IndexNamespace, id: &str) -> StoreResult<()>;

    /// Lists documents matching every filter, with offset pagination and a
    /// total hit count.
    async fn list(
        &self,
        ns: IndexNamespace,
        filters: &ListFilter,
        page: PageRequest,
    ) -> StoreResult<PagedRecords>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityKind;

    #[test]
    fn test_namespace_display() {
        let ns = EntityKind::Device.namespace();
        assert_eq!(ns.to_string(), "devices/device");
    }
}
