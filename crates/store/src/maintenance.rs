//! Maintenance operations over the lookup tables.
//!
//! Currently only the full purge used by the data-reset tooling. Purging is
//! refused outright in the production environment.

use std::sync::Arc;

use tracing::{info, warn};

use crate::core::{RecordStore, SearchIndex};
use crate::error::{AccessError, StoreResult};
use crate::types::EntityKind;

/// The environment name in which purging is refused.
const PRODUCTION_ENV: &str = "production";

/// Deletes every record of every entity kind from both stores.
///
/// Individual record failures are logged and skipped so one bad row does not
/// abort the purge.
///
/// # Errors
///
/// * `AccessError::EnvironmentProtected` - if `environment` is `"production"`
/// * `BackendError` - if a table scan fails
pub async fn purge_all(
    store: &Arc<dyn RecordStore>,
    index: &Arc<dyn SearchIndex>,
    environment: &str,
) -> StoreResult<u64> {
    if environment.eq_ignore_ascii_case(PRODUCTION_ENV) {
        return Err(AccessError::EnvironmentProtected {
            operation: "purge".to_string(),
            environment: environment.to_string(),
        }
        .into());
    }

    let mut purged = 0u64;
    for entity in EntityKind::ALL {
        let records = store.scan(entity).await?;
        info!(entity = %entity, count = records.len(), "Purging lookup table");

        for record in records {
            if let Err(error) = store.delete(entity, record.id()).await {
                warn!(entity = %entity, id = record.id(), %error, "Purge delete failed, skipping");
                continue;
            }
            if let Err(error) = index.delete(entity.namespace(), record.id()).await {
                warn!(
                    entity = %entity,
                    id = record.id(),
                    %error,
                    "Purge index delete failed, document left behind"
                );
            }
            purged += 1;
        }
    }
    Ok(purged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{MemoryIndex, MemoryStore};
    use crate::error::StoreError;
    use crate::types::LookupRecord;
    use serde_json::json;

    fn backends() -> (Arc<dyn RecordStore>, Arc<dyn SearchIndex>) {
        (Arc::new(MemoryStore::new()), Arc::new(MemoryIndex::new()))
    }

    #[tokio::test]
    async fn test_purge_refused_in_production() {
        let (store, index) = backends();
        let err = purge_all(&store, &index, "production").await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Access(AccessError::EnvironmentProtected { .. })
        ));
        assert!(purge_all(&store, &index, "PRODUCTION").await.is_err());
    }

    #[tokio::test]
    async fn test_purge_empties_both_stores() {
        let (store, index) = backends();
        let record = LookupRecord::from_content(json!({"id": "c-1", "name": "Chile"})).unwrap();
        store.put(EntityKind::Country, &record).await.unwrap();
        index
            .index(EntityKind::Country.namespace(), &record)
            .await
            .unwrap();

        let purged = purge_all(&store, &index, "test").await.unwrap();
        assert_eq!(purged, 1);
        assert!(store
            .get_by_id(EntityKind::Country, "c-1")
            .await
            .unwrap()
            .is_none());
        assert!(index
            .get_by_id(EntityKind::Country.namespace(), "c-1")
            .await
            .unwrap()
            .is_none());
    }
}
