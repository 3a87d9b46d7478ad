use std::net::SocketAddr;
use std::sync::Arc;

use common::image::MAX_IMAGE_SIZE;
use common::storage::FilesystemBlobStore;
use tracing::{Level, info};

use server::config::AppConfig;
use server::database::{ensure_indexes, init_db};
use server::state::AppState;
use server::store::DbRecipeStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = init_db(&config.database.url).await?;
    ensure_indexes(&db).await;

    let blob_store =
        FilesystemBlobStore::new(config.storage.data_dir.clone(), MAX_IMAGE_SIZE).await?;
    info!(path = %config.storage.data_dir.display(), "Image store ready");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = AppState {
        recipes: Arc::new(DbRecipeStore::new(db.clone())),
        blob_store: Arc::new(blob_store),
        db,
        config,
    };

    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
