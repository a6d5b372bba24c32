//! Purges every lookup record from both stores.
//!
//! Refuses to run when `LOOKUP_ENVIRONMENT` is `production`.

use clap::Parser;
use tracing::info;

use lookup_rest::{build_backends, init_logging, ServerConfig};
use lookup_store::maintenance::purge_all;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    let (store, index) = build_backends(&config)?;
    let purged = purge_all(&store, &index, &config.environment).await?;

    info!(purged, environment = %config.environment, "Purge complete");
    Ok(())
}
