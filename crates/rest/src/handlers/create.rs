//! Create handler: `POST /lookups/{entityType}`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use lookup_store::types::LookupRecord;
use serde_json::Value;

use crate::error::RestError;
use crate::extractors::{CallerExtractor, EntityPath};
use crate::state::AppState;

/// Extracts the payload as a field map, rejecting non-object bodies.
pub(crate) fn require_object(payload: Value) -> Result<serde_json::Map<String, Value>, RestError> {
    match payload {
        Value::Object(map) => Ok(map),
        _ => Err(RestError::BadRequest {
            message: "Request body must be a JSON object".to_string(),
        }),
    }
}

/// Creates a record with a server-generated id. Administrator only.
pub async fn create(
    State(state): State<AppState>,
    Path(entity_type): Path<String>,
    CallerExtractor(caller): CallerExtractor,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<LookupRecord>), RestError> {
    let EntityPath(entity) = EntityPath::parse(&entity_type)?;
    let fields = require_object(payload)?;

    let record = state.service().create(entity, fields, &caller).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
