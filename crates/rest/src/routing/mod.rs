//! Route configuration.
//!
//! Every lookup entity shares the same handler set; the `{entityType}` path
//! segment is resolved against the closed entity table, so unknown segments
//! produce a 404. GET routes also answer HEAD automatically.

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Builds the router for the lookup API.
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route(
            "/lookups/{entityType}",
            get(handlers::list::list).post(handlers::create::create),
        )
        .route(
            "/lookups/{entityType}/{id}",
            get(handlers::read::read)
                .put(handlers::update::replace)
                .patch(handlers::update::patch)
                .delete(handlers::delete::remove),
        )
        .with_state(state)
}
