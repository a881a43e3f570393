use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use webhoster::config::AppConfig;
use webhoster::database;
use webhoster::sites::SeaOrmMetadataStore;
use webhoster::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database.url).await?;
    database::ensure_indexes(&db).await?;

    let objects = common::storage::open(&config.storage).await?;
    info!(backend = ?config.storage.backend, "Object storage ready");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = AppState {
        config,
        objects,
        metadata: Arc::new(SeaOrmMetadataStore::new(db)),
    };
    let app = webhoster::build_router(state);

    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
