//! Update handlers: `PUT` and `PATCH` on `/lookups/{entityType}/{id}`.

use axum::{
    extract::{Path, State},
    Json,
};
use lookup_store::types::LookupRecord;
use serde_json::Value;

use crate::error::RestError;
use crate::extractors::{CallerExtractor, EntityPath};
use crate::handlers::create::require_object;
use crate::state::AppState;

/// Replaces every field of a record. Administrator only.
pub async fn replace(
    State(state): State<AppState>,
    Path((entity_type, id)): Path<(String, String)>,
    CallerExtractor(caller): CallerExtractor,
    Json(payload): Json<Value>,
) -> Result<Json<LookupRecord>, RestError> {
    let EntityPath(entity) = EntityPath::parse(&entity_type)?;
    let fields = require_object(payload)?;

    let record = state.service().replace(entity, &id, fields, &caller).await?;
    Ok(Json(record))
}

/// Merges partial fields into a record. Administrator only.
pub async fn patch(
    State(state): State<AppState>,
    Path((entity_type, id)): Path<(String, String)>,
    CallerExtractor(caller): CallerExtractor,
    Json(payload): Json<Value>,
) -> Result<Json<LookupRecord>, RestError> {
    let EntityPath(entity) = EntityPath::parse(&entity_type)?;
    let fields = require_object(payload)?;

    let record = state.service().patch(entity, &id, fields, &caller).await?;
    Ok(Json(record))
}
