//! The write coordinator.
//!
//! Every mutation is applied to the primary store first; only a successful
//! primary write is then mirrored into the search index and announced on the
//! event bus. Mirror and publish failures are logged and never surfaced, so
//! the index may lag the primary but the primary never lags the index.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::caller::CallerContext;
use crate::core::{topics, EventPublisher, LookupEvent, RecordStore, SearchIndex};
use crate::error::{RecordError, StoreResult};
use crate::types::{EntityKind, LookupRecord};
use crate::visibility;

/// Primary-first writes with best-effort index mirroring.
pub struct Coordinator {
    store: Arc<dyn RecordStore>,
    index: Arc<dyn SearchIndex>,
    events: Arc<dyn EventPublisher>,
}

impl Coordinator {
    /// Creates a coordinator over the given backends.
    pub fn new(
        store: Arc<dyn RecordStore>,
        index: Arc<dyn SearchIndex>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            store,
            index,
            events,
        }
    }

    /// Creates a record with a generated id, returning it shaped for
    /// `caller`.
    ///
    /// # Errors
    ///
    /// * `AccessError::AdminRequired` - if the caller is not an administrator
    /// * `RecordError::MissingRequiredField` - if a required field is absent
    /// * `BackendError` - if the primary write fails
    pub async fn create(
        &self,
        entity: EntityKind,
        fields: Map<String, Value>,
        caller: &CallerContext,
    ) -> StoreResult<LookupRecord> {
        caller.ensure_admin("create")?;
        check_required_fields(entity, &fields)?;

        let id = Uuid::new_v4().to_string();
        let mut record = LookupRecord::new(id, fields);
        record.set_deleted(false);

        self.store.put(entity, &record).await?;
        info!(entity = %entity, id = record.id(), "Created record");

        self.mirror(entity, &record).await;
        self.publish(topics::CREATE, entity, &record).await;
        Ok(shape(record, caller))
    }

    /// Replaces every field of an existing record, returning it shaped for
    /// `caller`. The id and the soft-delete flag are carried over from the
    /// stored record.
    ///
    /// # Errors
    ///
    /// * `AccessError::AdminRequired` - if the caller is not an administrator
    /// * `RecordError::NotFound` - if no record with `id` exists
    /// * `RecordError::MissingRequiredField` - if a required field is absent
    pub async fn replace(
        &self,
        entity: EntityKind,
        id: &str,
        fields: Map<String, Value>,
        caller: &CallerContext,
    ) -> StoreResult<LookupRecord> {
        caller.ensure_admin("update")?;
        check_required_fields(entity, &fields)?;

        let existing = self.require(entity, id).await?;
        let mut record = LookupRecord::new(id, fields);
        record.set_deleted(existing.is_deleted());

        self.store.put(entity, &record).await?;
        info!(entity = %entity, id, "Replaced record");

        self.mirror(entity, &record).await;
        self.publish(topics::UPDATE, entity, &record).await;
        Ok(shape(record, caller))
    }

    /// Merges partial fields into an existing record, returning it shaped
    /// for `caller`.
    ///
    /// # Errors
    ///
    /// * `AccessError::AdminRequired` - if the caller is not an administrator
    /// * `RecordError::NotFound` - if no record with `id` exists
    pub async fn patch(
        &self,
        entity: EntityKind,
        id: &str,
        fields: Map<String, Value>,
        caller: &CallerContext,
    ) -> StoreResult<LookupRecord> {
        caller.ensure_admin("update")?;

        let record = self.store.update(entity, id, &fields).await?;
        info!(entity = %entity, id, "Patched record");

        self.mirror(entity, &record).await;
        self.publish(topics::UPDATE, entity, &record).await;
        Ok(shape(record, caller))
    }

    /// Removes a record: a soft delete marks it `isDeleted` in both stores,
    /// `destroy` physically removes it from both.
    ///
    /// # Errors
    ///
    /// * `AccessError::AdminRequired` - if the caller is not an administrator
    /// * `RecordError::NotFound` - if no record with `id` exists
    pub async fn remove(
        &self,
        entity: EntityKind,
        id: &str,
        destroy: bool,
        caller: &CallerContext,
    ) -> StoreResult<()> {
        caller.ensure_admin("remove")?;

        let mut record = self.require(entity, id).await?;
        if destroy {
            self.store.delete(entity, id).await?;
            info!(entity = %entity, id, "Destroyed record");

            if let Err(error) = self.index.delete(entity.namespace(), id).await {
                warn!(
                    entity = %entity,
                    id,
                    backend = self.index.backend_name(),
                    %error,
                    "Index delete failed, document left to lag"
                );
            }
            self.publish(topics::DELETE, entity, &record).await;
        } else {
            let mut flag = Map::new();
            flag.insert(
                crate::types::DELETED_FLAG.to_string(),
                Value::Bool(true),
            );
            record = self.store.update(entity, id, &flag).await?;
            info!(entity = %entity, id, "Soft-deleted record");

            self.mirror(entity, &record).await;
            self.publish(topics::DELETE, entity, &record).await;
        }
        Ok(())
    }

    /// Reads the record from the primary store, failing with a not-found
    /// error when absent.
    async fn require(&self, entity: EntityKind, id: &str) -> StoreResult<LookupRecord> {
        self.store.get_by_id(entity, id).await?.ok_or_else(|| {
            RecordError::NotFound {
                entity,
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Mirrors the record into the search index, logging failures.
    async fn mirror(&self, entity: EntityKind, record: &LookupRecord) {
        if let Err(error) = self.index.index(entity.namespace(), record).await {
            warn!(
                entity = %entity,
                id = record.id(),
                backend = self.index.backend_name(),
                %error,
                "Index mirror failed, document left to lag"
            );
        }
    }

    /// Publishes a change notification, logging failures.
    async fn publish(&self, topic: &str, entity: EntityKind, record: &LookupRecord) {
        let event = LookupEvent::new(topic, entity, record.clone().into_content());
        if let Err(error) = self.events.publish(event).await {
            warn!(entity = %entity, topic, %error, "Event publish failed");
        }
    }
}

/// Shapes a write result for its caller: non-privileged views never carry
/// the soft-delete flag.
fn shape(record: LookupRecord, caller: &CallerContext) -> LookupRecord {
    visibility::resolve(record.clone(), caller)
        .into_record()
        .unwrap_or(record)
}

/// Rejects payloads missing any of the entity's required fields.
fn check_required_fields(entity: EntityKind, fields: &Map<String, Value>) -> StoreResult<()> {
    for field in entity.required_fields() {
        let present = fields.get(*field).is_some_and(|value| !value.is_null());
        if !present {
            return Err(RecordError::MissingRequiredField {
                entity,
                field: field.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_fields_enforced() {
        let mut fields = Map::new();
        fields.insert("name".to_string(), json!("Chile"));
        assert!(check_required_fields(EntityKind::Country, &fields).is_err());

        fields.insert("countryCode".to_string(), json!("CL"));
        assert!(check_required_fields(EntityKind::Country, &fields).is_ok());
    }

    #[test]
    fn test_null_counts_as_missing() {
        let mut fields = Map::new();
        fields.insert("name".to_string(), json!(null));
        assert!(check_required_fields(EntityKind::EducationalInstitution, &fields).is_err());
    }
}
