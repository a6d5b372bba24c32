//! # lookup-rest - Lookup Tables REST API
//!
//! This crate exposes the lookup tables (countries, devices, educational
//! institutions) over HTTP, backed by the dual-store persistence core in
//! `lookup-store`: an authoritative primary key-value store fronted by a
//! best-effort search index.
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | list | GET/HEAD | `/lookups/{type}?page&perPage&{field}=value` |
//! | read | GET/HEAD | `/lookups/{type}/{id}` |
//! | create | POST | `/lookups/{type}` |
//! | replace | PUT | `/lookups/{type}/{id}` |
//! | patch | PATCH | `/lookups/{type}/{id}` |
//! | delete | DELETE | `/lookups/{type}/{id}?destroy=bool` |
//! | health | GET | `/health` |
//!
//! `{type}` is one of `countries`, `devices`, `educationalInstitutions`.
//!
//! ## HTTP Headers
//!
//! - `X-Roles` - Comma-separated caller roles; `Administrator` unlocks
//!   mutations and the `includeSoftDeleted` query flag
//! - `X-Page`, `X-Per-Page`, `X-Total`, `X-Total-Pages`, `X-Prev-Page`,
//!   `X-Next-Page`, `Link` - Pagination metadata on index-served lists
//!
//! ## Error Handling
//!
//! Every error body is `{"message": "..."}` with the appropriate status:
//! 400 for malformed payloads and parameters, 403 for privilege failures,
//! 404 for unknown types and missing or hidden records, 500 for backend
//! faults.
//!
//! ## Architecture
//!
//! - [`config`] - Server configuration
//! - [`state`] - Application state (lookup service, configuration)
//! - [`error`] - Error types and JSON error responses
//! - [`extractors`] - Caller roles, entity path, and list parameters
//! - [`handlers`] - HTTP request handlers
//! - [`responses`] - Pagination header generation
//! - [`routing`] - Route configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;

pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use lookup_store::backends::{MemoryIndex, MemoryStore};
use lookup_store::core::{RecordStore, SearchIndex, TracingPublisher};
use lookup_store::lookup::LookupService;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration over in-memory
/// backends.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app() -> Router {
    let service = LookupService::new(
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryIndex::new()),
        Arc::new(TracingPublisher),
    );
    create_app_with_config(Arc::new(service), ServerConfig::default())
}

/// Creates the Axum application over the given service and configuration.
pub fn create_app_with_config(service: Arc<LookupService>, config: ServerConfig) -> Router {
    let state = AppState::new(service, config.clone());
    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the store and index backends named by the configuration.
///
/// The SQLite primary store is used when the `sqlite` feature is enabled
/// (file-backed when `database_url` is set, in-memory otherwise); the
/// Elasticsearch index when the `elasticsearch` feature is enabled and
/// `es_nodes` is set. Anything else falls back to the in-memory backends.
pub fn build_backends(
    config: &ServerConfig,
) -> anyhow::Result<(Arc<dyn RecordStore>, Arc<dyn SearchIndex>)> {
    let store: Arc<dyn RecordStore> = build_store(config)?;
    let index: Arc<dyn SearchIndex> = build_index(config)?;
    info!(
        store = store.backend_name(),
        index = index.backend_name(),
        "Storage backends initialized"
    );
    Ok((store, index))
}

#[cfg(feature = "sqlite")]
fn build_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn RecordStore>> {
    use lookup_store::backends::SqliteStore;

    let store = match &config.database_url {
        Some(path) => SqliteStore::open(path)?,
        None => SqliteStore::in_memory()?,
    };
    Ok(Arc::new(store))
}

#[cfg(not(feature = "sqlite"))]
fn build_store(_config: &ServerConfig) -> anyhow::Result<Arc<dyn RecordStore>> {
    Ok(Arc::new(MemoryStore::new()))
}

#[cfg(feature = "elasticsearch")]
fn build_index(config: &ServerConfig) -> anyhow::Result<Arc<dyn SearchIndex>> {
    use lookup_store::backends::{ElasticsearchConfig, ElasticsearchIndex};

    match &config.es_nodes {
        Some(nodes) => {
            let es_config = ElasticsearchConfig {
                nodes: nodes.split(',').map(|s| s.trim().to_string()).collect(),
                ..Default::default()
            };
            Ok(Arc::new(ElasticsearchIndex::new(es_config)?))
        }
        None => Ok(Arc::new(MemoryIndex::new())),
    }
}

#[cfg(not(feature = "elasticsearch"))]
fn build_index(_config: &ServerConfig) -> anyhow::Result<Arc<dyn SearchIndex>> {
    Ok(Arc::new(MemoryIndex::new()))
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any);

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "lookup_rest={level},lookup_store={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
