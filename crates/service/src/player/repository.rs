use async_trait::async_trait;

use super::domain::{Draft, Player};
use crate::errors::ServiceError;

/// Repository abstraction for player persistence.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Player>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Player>, ServiceError>;
    /// Insert when `draft.id` is `None`, otherwise overwrite that record.
    async fn save(&self, draft: Draft) -> Result<Player, ServiceError>;
    /// Returns true if a record was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError>;
}

/// In-memory repository for tests, benches and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Inner {
        rows: BTreeMap<i64, Player>,
        last_id: i64,
    }

    #[derive(Default)]
    pub struct InMemoryPlayerRepository {
        inner: Mutex<Inner>,
    }

    impl InMemoryPlayerRepository {
        pub async fn len(&self) -> usize {
            self.inner.lock().await.rows.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.len().await == 0
        }
    }

    #[async_trait]
    impl PlayerRepository for InMemoryPlayerRepository {
        async fn find_all(&self) -> Result<Vec<Player>, ServiceError> {
            let inner = self.inner.lock().await;
            Ok(inner.rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Player>, ServiceError> {
            let inner = self.inner.lock().await;
            Ok(inner.rows.get(&id).cloned())
        }

        async fn save(&self, draft: Draft) -> Result<Player, ServiceError> {
            let mut inner = self.inner.lock().await;
            let id = match draft.id {
                Some(id) if inner.rows.contains_key(&id) => id,
                Some(_) => return Err(ServiceError::not_found("player")),
                None => {
                    inner.last_id += 1;
                    inner.last_id
                }
            };
            let player = draft.into_model(id);
            inner.rows.insert(id, player.clone());
            Ok(player)
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            let mut inner = self.inner.lock().await;
            Ok(inner.rows.remove(&id).is_some())
        }
    }
}
