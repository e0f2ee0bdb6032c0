use crate::errors::RepositoryError;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynKeyValueStore = Arc<dyn KeyValueStoreTrait + Send + Sync>;

/// String key-value storage. Each call stands alone; there is no
/// transaction spanning several keys.
#[async_trait]
pub trait KeyValueStoreTrait {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError>;
    async fn remove(&self, key: &str) -> Result<(), RepositoryError>;
}
