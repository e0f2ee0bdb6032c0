use crate::{
    abstract_trait::{DynHashing, DynKeyValueStore},
    config::{Config, ConnectionManager, Hashing, RedisPool, StoreBackend, run_migrations},
    di::{DependenciesInject, DependenciesInjectDeps, ProductBackend},
    storage::{FileStore, RedisStore},
};
use anyhow::{Context, Result, anyhow};
use prometheus_client::{encoding::text::encode, registry::Registry};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("registry", &"<Registry>")
            .finish()
    }
}

impl AppState {
    /// Connect the configured storage and wire the services.
    pub async fn new(config: &Config) -> Result<Self> {
        let (store, backend): (DynKeyValueStore, ProductBackend) = match config.backend {
            StoreBackend::File => {
                let store = FileStore::new(config.local_store_path.clone());
                info!("Using local store file {}", store.path().display());
                (Arc::new(store) as DynKeyValueStore, ProductBackend::Local)
            }
            StoreBackend::Redis => {
                let url = config
                    .redis_url
                    .as_deref()
                    .ok_or_else(|| anyhow!("REDIS_URL is required for the redis backend"))?;
                let pool = RedisPool::connect(url)
                    .await
                    .context("Failed to connect to Redis")?;
                (
                    Arc::new(RedisStore::new(pool, config.redis_prefix.clone())) as DynKeyValueStore,
                    ProductBackend::Local,
                )
            }
            StoreBackend::Remote => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow!("DATABASE_URL is required for the remote backend"))?;
                let pool = ConnectionManager::new_pool(url, config.db_max_conn)
                    .await
                    .context("Failed to connect to the database")?;
                run_migrations(&pool)
                    .await
                    .context("Failed to run database migrations")?;
                info!("Database migrations applied");
                (
                    Arc::new(FileStore::new(config.local_store_path.clone())) as DynKeyValueStore,
                    ProductBackend::Remote(pool),
                )
            }
        };

        let hash = Arc::new(Hashing::new(config.bcrypt_cost)) as DynHashing;
        Ok(Self::with_store(store, backend, hash).await)
    }

    /// Wire the services over an already-built store.
    pub async fn with_store(
        store: DynKeyValueStore,
        backend: ProductBackend,
        hash: DynHashing,
    ) -> Self {
        let registry = Arc::new(Mutex::new(Registry::default()));

        let di_container = DependenciesInject::new(DependenciesInjectDeps {
            store,
            backend,
            hash,
            registry: registry.clone(),
        })
        .await;

        Self {
            di_container,
            registry,
        }
    }

    /// Current metrics in the prometheus text format.
    pub async fn metrics_text(&self) -> Result<String> {
        let mut buffer = String::new();
        encode(&mut buffer, &*self.registry.lock().await)
            .context("Failed to encode metrics")?;
        Ok(buffer)
    }
}
