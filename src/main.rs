//! tasklite - a minimal todo backend.
//!
//! Starting the process loads `config.toml` if present, prepares the
//! database (schema + seed), and serves the HTTP API.

use anyhow::Result;
use tasklite::config::Config;
use tasklite::routes;
use tasklite::store::TodoStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tasklite=info,tower_http=info")),
        )
        .init();

    info!("Starting tasklite...");

    let config = Config::load("config.toml")?;

    let store = TodoStore::open(&config.database.path).await?;
    store.init_schema().await?;
    store.seed_if_empty().await?;
    info!("database ready at {}", config.database.path);

    let app = routes::router(store, &config.cors);
    let addr = config.server.addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
