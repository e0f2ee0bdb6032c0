use crate::{abstract_trait::KeyValueStoreTrait, errors::RepositoryError};
use async_trait::async_trait;
use deadpool_redis::{Connection, Pool};
use std::sync::Arc;
use tracing::{debug, error};

/// Key-value store on a redis instance. Keys are namespaced with `prefix`
/// so several users or apps can share one database.
#[derive(Clone)]
pub struct RedisStore {
    redis_pool: Arc<Pool>,
    prefix: String,
}

impl RedisStore {
    pub fn new(redis_pool: Pool, prefix: impl Into<String>) -> Self {
        Self {
            redis_pool: Arc::new(redis_pool),
            prefix: prefix.into(),
        }
    }

    fn key(&self, key: &str) -> String {
        format!("{}:{key}", self.prefix)
    }

    async fn get_conn(&self) -> Result<Connection, RepositoryError> {
        self.redis_pool.get().await.map_err(|e| {
            error!("Failed to get Redis pooled connection: {:?}", e);
            RepositoryError::from(e)
        })
    }
}

#[async_trait]
impl KeyValueStoreTrait for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let mut conn = self.get_conn().await?;
        let result: redis::RedisResult<Option<String>> = redis::cmd("GET")
            .arg(self.key(key))
            .query_async(&mut conn)
            .await;

        result.map_err(|e| {
            error!("Redis get error for key '{}': {:?}", key, e);
            RepositoryError::from(e)
        })
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let mut conn = self.get_conn().await?;
        redis::cmd("SET")
            .arg(self.key(key))
            .arg(value)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| {
                error!("Failed to set key '{}': {:?}", key, e);
                RepositoryError::from(e)
            })?;

        debug!("Stored key '{}' in redis", key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        let mut conn = self.get_conn().await?;
        redis::cmd("DEL")
            .arg(self.key(key))
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| {
                error!("Failed to delete key '{}': {:?}", key, e);
                RepositoryError::from(e)
            })
    }
}
