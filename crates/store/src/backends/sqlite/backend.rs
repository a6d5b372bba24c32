//! SQLite-backed primary record store.
//!
//! One table per entity kind, each row holding the record's JSON content
//! keyed by id. Connections come from an r2d2 pool; statements are short
//! enough that they run inline on the async executor.

use std::fmt::Debug;
use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::RecordStore;
use crate::error::{BackendError, RecordError, StoreError, StoreResult};
use crate::types::{EntityKind, LookupRecord};

/// Configuration for the SQLite store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteStoreConfig {
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u32,

    /// Enable WAL mode for better concurrency.
    #[serde(default = "default_true")]
    pub enable_wal: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_connection_timeout_ms() -> u64 {
    30000
}

fn default_busy_timeout_ms() -> u32 {
    5000
}

fn default_true() -> bool {
    true
}

impl Default for SqliteStoreConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            connection_timeout_ms: default_connection_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
            enable_wal: true,
        }
    }
}

/// SQLite primary store.
pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
    config: SqliteStoreConfig,
    is_memory: bool,
}

impl Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("config", &self.config)
            .field("is_memory", &self.is_memory)
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Creates a new in-memory SQLite store.
    pub fn in_memory() -> StoreResult<Self> {
        // A multi-connection pool over ":memory:" would give each connection
        // its own database; keep the pool at one connection.
        let mut config = SqliteStoreConfig::default();
        config.max_connections = 1;
        Self::with_config(":memory:", config)
    }

    /// Opens or creates a file-based SQLite database.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::with_config(path, SqliteStoreConfig::default())
    }

    /// Creates a store with custom configuration.
    pub fn with_config<P: AsRef<Path>>(path: P, config: SqliteStoreConfig) -> StoreResult<Self> {
        let path_str = path.as_ref().to_string_lossy();
        let is_memory = path_str == ":memory:";

        let manager = if is_memory {
            SqliteConnectionManager::memory()
        } else {
            SqliteConnectionManager::file(path.as_ref())
        };

        let pool = Pool::builder()
            .max_size(config.max_connections)
            .connection_timeout(std::time::Duration::from_millis(
                config.connection_timeout_ms,
            ))
            .build(manager)
            .map_err(|e| {
                StoreError::Backend(BackendError::ConnectionFailed {
                    backend_name: "sqlite".to_string(),
                    message: e.to_string(),
                })
            })?;

        let store = Self {
            pool,
            config,
            is_memory,
        };
        store.configure_connection()?;
        store.init_schema()?;
        Ok(store)
    }

    fn configure_connection(&self) -> StoreResult<()> {
        let conn = self.get_connection()?;
        conn.busy_timeout(std::time::Duration::from_millis(u64::from(
            self.config.busy_timeout_ms,
        )))?;
        if self.config.enable_wal && !self.is_memory {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }
        Ok(())
    }

    /// Creates the per-entity tables when absent.
    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.get_connection()?;
        for entity in EntityKind::ALL {
            conn.execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {} (
                         id TEXT PRIMARY KEY,
                         content TEXT NOT NULL,
                         updated_at TEXT NOT NULL
                     )",
                    entity.table_name()
                ),
                [],
            )?;
        }
        Ok(())
    }

    fn get_connection(&self) -> StoreResult<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(StoreError::from)
    }

    fn read_record(
        &self,
        conn: &rusqlite::Connection,
        entity: EntityKind,
        id: &str,
    ) -> StoreResult<Option<LookupRecord>> {
        let content: Option<String> = conn
            .query_row(
                &format!("SELECT content FROM {} WHERE id = ?1", entity.table_name()),
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        match content {
            Some(raw) => {
                let value: Value = serde_json::from_str(&raw)?;
                let record = LookupRecord::from_content(value)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn write_record(
        &self,
        conn: &rusqlite::Connection,
        entity: EntityKind,
        record: &LookupRecord,
    ) -> StoreResult<()> {
        let content = serde_json::to_string(record)?;
        conn.execute(
            &format!(
                "INSERT INTO {} (id, content, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET content = ?2, updated_at = ?3",
                entity.table_name()
            ),
            params![record.id(), content, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn get_by_id(&self, entity: EntityKind, id: &str) -> StoreResult<Option<LookupRecord>> {
        let conn = self.get_connection()?;
        self.read_record(&conn, entity, id)
    }

    async fn put(&self, entity: EntityKind, record: &LookupRecord) -> StoreResult<()> {
        let conn = self.get_connection()?;
        self.write_record(&conn, entity, record)
    }

    async fn update(
        &self,
        entity: EntityKind,
        id: &str,
        fields: &Map<String, Value>,
    ) -> StoreResult<LookupRecord> {
        let conn = self.get_connection()?;
        let mut record =
            self.read_record(&conn, entity, id)?
                .ok_or_else(|| RecordError::NotFound {
                    entity,
                    id: id.to_string(),
                })?;
        record.merge(fields);
        self.write_record(&conn, entity, &record)?;
        Ok(record)
    }

    async fn delete(&self, entity: EntityKind, id: &str) -> StoreResult<()> {
        let conn = self.get_connection()?;
        let removed = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", entity.table_name()),
            params![id],
        )?;
        if removed == 0 {
            return Err(RecordError::NotFound {
                entity,
                id: id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn scan(&self, entity: EntityKind) -> StoreResult<Vec<LookupRecord>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT content FROM {} ORDER BY id",
            entity.table_name()
        ))?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut records = Vec::new();
        for raw in rows {
            let value: Value = serde_json::from_str(&raw?)?;
            records.push(LookupRecord::from_content(value)?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> SqliteStore {
        SqliteStore::in_memory().unwrap()
    }

    fn device(id: &str, model: &str) -> LookupRecord {
        LookupRecord::from_content(json!({
            "id": id,
            "type": "phone",
            "manufacturer": "Acme",
            "model": model,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_put_then_get_round_trip() {
        let store = store();
        let record = device("d-1", "A1");
        store.put(EntityKind::Device, &record).await.unwrap();

        let read = store.get_by_id(EntityKind::Device, "d-1").await.unwrap();
        assert_eq!(read, Some(record));
    }

    #[tokio::test]
    async fn test_put_replaces_existing() {
        let store = store();
        store.put(EntityKind::Device, &device("d-1", "A1")).await.unwrap();
        store.put(EntityKind::Device, &device("d-1", "A2")).await.unwrap();

        let read = store
            .get_by_id(EntityKind::Device, "d-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(read.field("model"), Some(&json!("A2")));
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = store();
        store.put(EntityKind::Device, &device("d-1", "A1")).await.unwrap();

        let mut patch = Map::new();
        patch.insert("operatingSystem".to_string(), json!("android"));
        let updated = store
            .update(EntityKind::Device, "d-1", &patch)
            .await
            .unwrap();
        assert_eq!(updated.field("operatingSystem"), Some(&json!("android")));
        assert_eq!(updated.field("model"), Some(&json!("A1")));
    }

    #[tokio::test]
    async fn test_delete_missing_record_fails() {
        let store = store();
        let err = store.delete(EntityKind::Country, "nope").await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Record(RecordError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_scan_is_ordered_and_per_entity() {
        let store = store();
        store.put(EntityKind::Device, &device("d-2", "B")).await.unwrap();
        store.put(EntityKind::Device, &device("d-1", "A")).await.unwrap();
        store
            .put(
                EntityKind::Country,
                &LookupRecord::from_content(json!({"id": "c-1", "name": "Chile"})).unwrap(),
            )
            .await
            .unwrap();

        let devices = store.scan(EntityKind::Device).await.unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].id(), "d-1");

        let countries = store.scan(EntityKind::Country).await.unwrap();
        assert_eq!(countries.len(), 1);
    }

    #[tokio::test]
    async fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lookups.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.put(EntityKind::Device, &device("d-1", "A1")).await.unwrap();
        }
        let reopened = SqliteStore::open(&path).unwrap();
        assert!(reopened
            .get_by_id(EntityKind::Device, "d-1")
            .await
            .unwrap()
            .is_some());
    }
}
