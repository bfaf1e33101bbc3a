use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::player::domain::{Draft, Player};
use crate::player::repository::PlayerRepository;

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmPlayerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPlayerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl PlayerRepository for SeaOrmPlayerRepository {
    async fn find_all(&self) -> Result<Vec<Player>, ServiceError> {
        Ok(models::player::find_all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Player>, ServiceError> {
        Ok(models::player::find_by_id(&self.db, id).await?)
    }

    async fn save(&self, draft: Draft) -> Result<Player, ServiceError> {
        Ok(models::player::save(&self.db, draft).await?)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(models::player::delete(&self.db, id).await?)
    }
}
