//! Lookup tables REST API server binary.

use std::sync::Arc;

use clap::Parser;
use lookup_store::core::TracingPublisher;
use lookup_store::lookup::LookupService;
use tracing::info;

use lookup_rest::{build_backends, create_app_with_config, init_logging, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        anyhow::bail!("Invalid configuration");
    }

    let (store, index) = build_backends(&config)?;
    let service = Arc::new(LookupService::new(store, index, Arc::new(TracingPublisher)));

    let addr = config.socket_addr();
    let app = create_app_with_config(service, config);

    info!(%addr, "Starting lookup API server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
