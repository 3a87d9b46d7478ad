use std::sync::Arc;

use common::RecipeStore;
use common::storage::BlobStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub recipes: Arc<dyn RecipeStore>,
    pub blob_store: Arc<dyn BlobStore>,
    pub db: DatabaseConnection,
    pub config: AppConfig,
}
