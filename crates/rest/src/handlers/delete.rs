//! Delete handler: `DELETE /lookups/{entityType}/{id}`.
//!
//! The default is a soft delete that marks the record `isDeleted`;
//! `?destroy=true` removes it physically from both stores.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::error::RestError;
use crate::extractors::{CallerExtractor, EntityPath};
use crate::state::AppState;

/// Removes a record. Administrator only.
pub async fn remove(
    State(state): State<AppState>,
    Path((entity_type, id)): Path<(String, String)>,
    CallerExtractor(caller): CallerExtractor,
    Query(query): Query<HashMap<String, String>>,
) -> Result<StatusCode, RestError> {
    let EntityPath(entity) = EntityPath::parse(&entity_type)?;
    let destroy = match query.get("destroy").map(String::as_str) {
        None | Some("false") => false,
        Some("true") => true,
        Some(other) => {
            return Err(RestError::BadRequest {
                message: format!("'{}' is not a valid boolean for destroy", other),
            });
        }
    };

    state.service().remove(entity, &id, destroy, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
