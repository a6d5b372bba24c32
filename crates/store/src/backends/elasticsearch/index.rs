//! SearchIndex implementation for Elasticsearch.
//!
//! Documents are stored flat, one per record, keyed by the record id. Every
//! failure is reported as an index error; the read-through resolver absorbs
//! those and falls back to the primary store.

use async_trait::async_trait;
use elasticsearch::{DeleteParts, GetParts, IndexParts, SearchParts};
use serde_json::{json, Value};

use crate::core::{IndexNamespace, ListFilter, SearchIndex};
use crate::error::{IndexError, StoreError, StoreResult};
use crate::types::{LookupRecord, PageRequest, PagedRecords};

use super::backend::ElasticsearchIndex;

fn unavailable(message: String) -> StoreError {
    StoreError::Index(IndexError::Unavailable { message })
}

fn malformed(ns: IndexNamespace, message: String) -> StoreError {
    StoreError::Index(IndexError::MalformedDocument {
        namespace: ns.to_string(),
        message,
    })
}

/// Builds the search query: one term clause per filter, matching all records
/// when no filters are given.
fn build_query(filters: &ListFilter) -> Value {
    if filters.is_empty() {
        return json!({"match_all": {}});
    }
    let clauses: Vec<Value> = filters
        .iter()
        .map(|(field, value)| {
            let mut term = serde_json::Map::new();
            term.insert(format!("{field}.keyword"), json!({"value": value}));
            json!({"term": term})
        })
        .collect();
    json!({"bool": {"must": clauses}})
}

#[async_trait]
impl SearchIndex for ElasticsearchIndex {
    fn backend_name(&self) -> &'static str {
        "elasticsearch"
    }

    async fn get_by_id(&self, ns: IndexNamespace, id: &str) -> StoreResult<Option<LookupRecord>> {
        let index = self.index_name(ns);
        let response = self
            .client()
            .get(GetParts::IndexId(&index, id))
            .send()
            .await
            .map_err(|e| unavailable(format!("Failed to get document: {}", e)))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(unavailable(format!(
                "Get returned status {} for {}/{}",
                status, index, id
            )));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| unavailable(format!("Failed to read get response: {}", e)))?;
        let source = body
            .get("_source")
            .cloned()
            .ok_or_else(|| malformed(ns, "get response missing _source".to_string()))?;
        let record =
            LookupRecord::from_content(source).map_err(|e| malformed(ns, e.to_string()))?;
        Ok(Some(record))
    }

    async fn index(&self, ns: IndexNamespace, record: &LookupRecord) -> StoreResult<()> {
        let index = self.index_name(ns);
        let response = self
            .client()
            .index(IndexParts::IndexId(&index, record.id()))
            .body(record)
            .send()
            .await
            .map_err(|e| unavailable(format!("Failed to index document: {}", e)))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(unavailable(format!(
                "Index returned status {}: {}",
                status, body
            )));
        }
        Ok(())
    }

    async fn delete(&self, ns: IndexNamespace, id: &str) -> StoreResult<()> {
        let index = self.index_name(ns);
        let response = self
            .client()
            .delete(DeleteParts::IndexId(&index, id))
            .send()
            .await
            .map_err(|e| unavailable(format!("Failed to delete document: {}", e)))?;

        let status = response.status_code();
        // Deleting an absent document is not an error.
        if !status.is_success() && status.as_u16() != 404 {
            return Err(unavailable(format!(
                "Delete returned status {} for {}/{}",
                status, index, id
            )));
        }
        Ok(())
    }

    async fn list(
        &self,
        ns: IndexNamespace,
        filters: &ListFilter,
        page: PageRequest,
    ) -> StoreResult<PagedRecords> {
        let index = self.index_name(ns);
        let body = json!({
            "query": build_query(filters),
            "from": page.offset(),
            "size": page.per_page,
            "track_total_hits": true,
            "sort": [{"id.keyword": {"order": "asc"}}],
        });

        let response = self
            .client()
            .search(SearchParts::Index(&[&index]))
            .body(body)
            .send()
            .await
            .map_err(|e| unavailable(format!("Failed to search: {}", e)))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(unavailable(format!(
                "Search returned status {}: {}",
                status, body
            )));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| unavailable(format!("Failed to read search response: {}", e)))?;

        let total = body
            .pointer("/hits/total/value")
            .and_then(Value::as_u64)
            .ok_or_else(|| malformed(ns, "search response missing hits.total".to_string()))?;

        let hits = body
            .pointer("/hits/hits")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut items = Vec::with_capacity(hits.len());
        for hit in hits {
            let source = hit
                .get("_source")
                .cloned()
                .ok_or_else(|| malformed(ns, "search hit missing _source".to_string()))?;
            items.push(
                LookupRecord::from_content(source).map_err(|e| malformed(ns, e.to_string()))?,
            );
        }

        Ok(PagedRecords {
            items,
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }
}
