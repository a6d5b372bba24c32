//! The stored record type.
//!
//! A [`LookupRecord`] wraps a JSON object holding the entity's fields. Every
//! record carries an opaque string `id` (immutable once assigned, the lookup
//! key in both stores) and an optional boolean `isDeleted` soft-delete flag
//! (absent means `false`).

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{RecordError, StoreResult};

/// The soft-delete flag field name.
pub const DELETED_FLAG: &str = "isDeleted";

/// The record identifier field name.
pub const ID_FIELD: &str = "id";

/// A lookup record: a flat JSON object with an `id` and optional `isDeleted`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct LookupRecord {
    id: String,
    content: Map<String, Value>,
}

impl LookupRecord {
    /// Creates a record from an id and a field map.
    ///
    /// The `id` field inside the map, if any, is overwritten.
    pub fn new(id: impl Into<String>, mut fields: Map<String, Value>) -> Self {
        let id = id.into();
        fields.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        Self { id, content: fields }
    }

    /// Creates a record from a JSON value, which must be an object with a
    /// string `id`.
    pub fn from_content(value: Value) -> StoreResult<Self> {
        let content = match value {
            Value::Object(map) => map,
            other => {
                return Err(RecordError::InvalidRecord {
                    message: format!("expected a JSON object, got {}", json_kind(&other)),
                }
                .into());
            }
        };
        let id = content
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| RecordError::InvalidRecord {
                message: "missing string field 'id'".to_string(),
            })?;
        Ok(Self { id, content })
    }

    /// Returns the record identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the underlying field map, including `id`.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.content
    }

    /// Returns a single field value, if present.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.content.get(name)
    }

    /// Consumes the record and returns its fields as a JSON value.
    pub fn into_content(self) -> Value {
        Value::Object(self.content)
    }

    /// Whether the record is soft-deleted. An absent flag means not deleted.
    pub fn is_deleted(&self) -> bool {
        self.content
            .get(DELETED_FLAG)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Sets the soft-delete flag.
    pub fn set_deleted(&mut self, deleted: bool) {
        self.content
            .insert(DELETED_FLAG.to_string(), Value::Bool(deleted));
    }

    /// Returns a copy with the soft-delete flag removed.
    pub fn without_deleted_flag(&self) -> Self {
        let mut content = self.content.clone();
        content.remove(DELETED_FLAG);
        Self {
            id: self.id.clone(),
            content,
        }
    }

    /// Merges partial fields into the record. `id` cannot be changed.
    pub fn merge(&mut self, fields: &Map<String, Value>) {
        for (key, value) in fields {
            if key == ID_FIELD {
                continue;
            }
            self.content.insert(key.clone(), value.clone());
        }
    }
}

impl Serialize for LookupRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.content.serialize(serializer)
    }
}

impl TryFrom<Value> for LookupRecord {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_content(value).map_err(|e| e.to_string())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
