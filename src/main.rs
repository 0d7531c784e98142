use std::sync::Arc;

use tracing::{Level, info};

use catcollector::config::AppConfig;
use catcollector::state::AppState;
use catcollector::storage::FsObjectStore;
use catcollector::{build_router, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database.url).await?;

    let store = FsObjectStore::new(
        config.storage.root.clone(),
        config.storage.max_object_size,
    )
    .await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        db,
        config,
        store: Arc::new(store),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("CatCollector running at http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
