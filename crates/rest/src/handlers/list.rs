//! List handler: `GET /lookups/{entityType}`.

use std::collections::HashMap;

use axum::{
    extract::{OriginalUri, Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use lookup_store::lookup::ListOutcome;
use tracing::debug;

use crate::error::RestError;
use crate::extractors::{CallerExtractor, EntityPath, ListParams};
use crate::responses::pagination_headers;
use crate::state::AppState;

/// Lists records of one entity type.
///
/// Index-served results carry pagination headers; a primary-store fallback
/// returns the plain filtered array with none.
pub async fn list(
    State(state): State<AppState>,
    Path(entity_type): Path<String>,
    OriginalUri(uri): OriginalUri,
    CallerExtractor(caller): CallerExtractor,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, RestError> {
    let EntityPath(entity) = EntityPath::parse(&entity_type)?;
    let params = ListParams::parse(query, state.default_page_size(), state.max_page_size())?;
    let caller = caller.with_soft_deleted(params.include_soft_deleted);

    debug!(entity = %entity, page = params.page.page, per_page = params.page.per_page, "List request");

    let outcome = state
        .service()
        .list(entity, &params.filters, params.page, &caller)
        .await?;

    match outcome {
        ListOutcome::Indexed(page) => {
            let query_pairs: Vec<(String, String)> =
                url::form_urlencoded::parse(uri.query().unwrap_or("").as_bytes())
                    .into_owned()
                    .collect();
            let headers =
                pagination_headers(state.base_url(), uri.path(), &query_pairs, &page)?;
            Ok((headers, Json(page.items)).into_response())
        }
        ListOutcome::Fallback(records) => Ok(Json(records).into_response()),
    }
}
