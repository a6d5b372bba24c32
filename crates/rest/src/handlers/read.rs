//! Read handler: `GET /lookups/{entityType}/{id}`.
//!
//! HEAD requests on the same route are answered automatically by axum with
//! the GET headers and an empty body.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use lookup_store::types::LookupRecord;

use crate::error::RestError;
use crate::extractors::{parse_soft_deleted_flag, CallerExtractor, EntityPath};
use crate::state::AppState;

/// Reads one record by id.
pub async fn read(
    State(state): State<AppState>,
    Path((entity_type, id)): Path<(String, String)>,
    CallerExtractor(caller): CallerExtractor,
    Query(mut query): Query<HashMap<String, String>>,
) -> Result<Json<LookupRecord>, RestError> {
    let EntityPath(entity) = EntityPath::parse(&entity_type)?;
    let include_soft_deleted = parse_soft_deleted_flag(query.remove("includeSoftDeleted"))?;
    let caller = caller.with_soft_deleted(include_soft_deleted);

    let record = state.service().fetch(entity, &id, &caller).await?;
    Ok(Json(record))
}
