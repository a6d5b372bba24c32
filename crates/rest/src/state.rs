//! Application state for the lookup REST API.
//!
//! The state holds the lookup service built over the injected backends, plus
//! the server configuration. Backends are constructed once at startup and
//! shared by every handler.

use std::sync::Arc;

use lookup_store::lookup::LookupService;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
#[derive(Clone)]
pub struct AppState {
    service: Arc<LookupService>,
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Creates a new AppState with the given service and configuration.
    pub fn new(service: Arc<LookupService>, config: ServerConfig) -> Self {
        Self {
            service,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the lookup service.
    pub fn service(&self) -> &LookupService {
        &self.service
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the base URL for the server.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the default page size for list results.
    pub fn default_page_size(&self) -> u32 {
        self.config.default_page_size
    }

    /// Returns the maximum page size for list results.
    pub fn max_page_size(&self) -> u32 {
        self.config.max_page_size
    }
}
