#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

/// Fresh in-memory SQLite database with the schema applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
