// HTTP API server binary for fashion-feed
// Serves the product listing endpoint backed by Postgres

use anyhow::Result;
use fashion_feed::api::ApiServer;
use fashion_feed::store::SharedStore;
use fashion_feed::tracing::init_tracing;
use fashion_feed::util::env as env_util;

#[actix_web::main]
async fn main() -> Result<()> {
    init_tracing("info,sqlx=warn")?;

    tracing::info!("Initializing fashion-feed API server");

    // Load dotenv/env once (safe to call multiple times)
    env_util::init_env();

    // Surface a misconfigured DSN at startup but keep serving; each request
    // reports the same failure until the configuration is fixed.
    if let Err(e) = env_util::db_url() {
        tracing::warn!(error = %e, "database not configured yet");
    }

    // Load configuration from environment
    let server = ApiServer::from_env()?;

    // Store connects lazily on first request
    let store = SharedStore::new();

    // Start HTTP server
    server.run(store).await?;

    Ok(())
}
