use std::time::Duration;

use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::{info, warn};

use crate::entity::recipe;

/// Connect to PostgreSQL and bring the `recipe` and `image` tables in line
/// with the entity definitions.
pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());

    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("server::entity::*")
        .sync(&db)
        .await?;
    info!("Database schema synchronized");

    Ok(db)
}

/// Create secondary indexes that schema sync does not manage.
///
/// Failures are logged and skipped; listing still works without them.
pub async fn ensure_indexes(db: &DatabaseConnection) {
    // Backs the newest-first listing:
    // SELECT * FROM recipe ORDER BY created_at DESC, id DESC
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_recipe_created_at")
        .table(recipe::Entity)
        .col(recipe::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => info!("Ensured index idx_recipe_created_at exists"),
        Err(e) => warn!("Failed to create index idx_recipe_created_at: {}", e),
    }
}
