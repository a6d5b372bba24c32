//! Event notification seam for write operations.
//!
//! After a successful write the coordinator emits a notification describing
//! the change. Publishing is strictly best-effort: a failed publish is logged
//! and never blocks or fails the write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::StoreResult;
use crate::types::EntityKind;

/// Notification topics emitted by the write coordinator.
pub mod topics {
    /// A record was created.
    pub const CREATE: &str = "lookup.notification.create";
    /// A record was updated.
    pub const UPDATE: &str = "lookup.notification.update";
    /// A record was removed, softly or physically.
    pub const DELETE: &str = "lookup.notification.delete";
}

/// A change notification.
#[derive(Debug, Clone, Serialize)]
pub struct LookupEvent {
    /// The notification topic.
    pub topic: String,

    /// The entity type the change applies to.
    pub entity: EntityKind,

    /// The record payload after the change.
    pub payload: Value,

    /// When the event was produced.
    pub timestamp: DateTime<Utc>,
}

impl LookupEvent {
    /// Creates an event stamped with the current time.
    pub fn new(topic: &str, entity: EntityKind, payload: Value) -> Self {
        Self {
            topic: topic.to_string(),
            entity,
            payload,
            timestamp: Utc::now(),
        }
    }
}

/// Transport for change notifications.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes one event.
    async fn publish(&self, event: LookupEvent) -> StoreResult<()>;
}

/// Publisher that writes events to the tracing log.
///
/// Stands in for the external bus transport, which is wired in by the
/// deployment, not by this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPublisher;

#[async_trait]
impl EventPublisher for TracingPublisher {
    async fn publish(&self, event: LookupEvent) -> StoreResult<()> {
        info!(
            topic = %event.topic,
            entity = %event.entity,
            timestamp = %event.timestamp.to_rfc3339(),
            "Publishing lookup event"
        );
        Ok(())
    }
}
