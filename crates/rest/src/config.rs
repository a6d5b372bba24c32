//! Server configuration for the lookup REST API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LOOKUP_SERVER_PORT` | 8080 | Server port |
//! | `LOOKUP_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `LOOKUP_LOG_LEVEL` | info | Log level |
//! | `LOOKUP_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `LOOKUP_ENABLE_CORS` | true | Enable CORS |
//! | `LOOKUP_CORS_ORIGINS` | * | Allowed origins |
//! | `LOOKUP_BASE_URL` | http://localhost:8080 | Server base URL |
//! | `LOOKUP_DATABASE_URL` | (in-memory) | SQLite database path |
//! | `LOOKUP_ES_NODES` | (unset) | Elasticsearch node URLs |
//! | `LOOKUP_ENVIRONMENT` | development | Deployment environment name |

use clap::Parser;

/// Server configuration for the lookup REST API.
///
/// Constructed from environment variables via [`ServerConfig::from_env`],
/// from command line arguments via `ServerConfig::parse`, or
/// programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "lookup-server")]
#[command(about = "Lookup tables REST API server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "LOOKUP_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "LOOKUP_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "LOOKUP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "LOOKUP_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "LOOKUP_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "LOOKUP_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Base URL for the server (used in pagination Link headers).
    #[arg(long, env = "LOOKUP_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// SQLite database path. Unset means an in-memory database.
    #[arg(long, env = "LOOKUP_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Elasticsearch node URLs (comma-separated). Unset means the in-memory
    /// index.
    #[arg(long, env = "LOOKUP_ES_NODES")]
    pub es_nodes: Option<String>,

    /// Deployment environment name. Purging is refused in "production".
    #[arg(long, env = "LOOKUP_ENVIRONMENT", default_value = "development")]
    pub environment: String,

    /// Default page size for list results.
    #[arg(long, env = "LOOKUP_DEFAULT_PAGE_SIZE", default_value = "20")]
    pub default_page_size: u32,

    /// Maximum page size for list results.
    #[arg(long, env = "LOOKUP_MAX_PAGE_SIZE", default_value = "100")]
    pub max_page_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            base_url: "http://localhost:8080".to_string(),
            database_url: None,
            es_nodes: None,
            environment: "development".to_string(),
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            errors.push(format!("Base URL '{}' is not a valid URL", self.base_url));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing: in-memory backends, a
    /// short timeout, and CORS disabled.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            cors_origins: "*".to_string(),
            base_url: "http://localhost".to_string(),
            database_url: None,
            es_nodes: None,
            environment: "test".to_string(),
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}
