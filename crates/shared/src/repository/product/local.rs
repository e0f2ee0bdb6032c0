use crate::{
    abstract_trait::{DynKeyValueStore, ProductChange, ProductStoreTrait},
    errors::RepositoryError,
    model::Product,
};
use async_trait::async_trait;
use tracing::{error, info};

pub const PRODUCTS_KEY: &str = "products";

/// Keeps the whole collection as one JSON array under [`PRODUCTS_KEY`].
pub struct LocalProductRepository {
    store: DynKeyValueStore,
}

impl LocalProductRepository {
    pub fn new(store: DynKeyValueStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductStoreTrait for LocalProductRepository {
    async fn fetch_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let Some(raw) = self.store.get(PRODUCTS_KEY).await? else {
            info!("No stored product list yet");
            return Ok(Vec::new());
        };

        let products: Vec<Product> = serde_json::from_str(&raw).map_err(|err| {
            error!("❌ Failed to decode stored product list: {err}");
            RepositoryError::from(err)
        })?;

        info!("📦 Loaded {} products from local storage", products.len());
        Ok(products)
    }

    async fn persist(
        &self,
        snapshot: &[Product],
        change: ProductChange<'_>,
    ) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(snapshot)?;

        self.store.set(PRODUCTS_KEY, &json).await.map_err(|err| {
            error!(
                "❌ Failed to save product list after {} of {}: {err}",
                change.kind(),
                change.id()
            );
            err
        })?;

        info!(
            "💾 Saved {} products after {} of {}",
            snapshot.len(),
            change.kind(),
            change.id()
        );
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}
