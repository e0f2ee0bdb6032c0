use crate::{
    errors::RepositoryError,
    model::{Product, ProductId},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProductStore = Arc<dyn ProductStoreTrait + Send + Sync>;

/// The mutation being mirrored to storage.
#[derive(Debug, Clone, Copy)]
pub enum ProductChange<'a> {
    Created(&'a Product),
    Updated(&'a Product),
    Deleted(&'a ProductId),
}

impl ProductChange<'_> {
    pub fn id(&self) -> &ProductId {
        match self {
            ProductChange::Created(product) | ProductChange::Updated(product) => &product.id,
            ProductChange::Deleted(id) => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProductChange::Created(_) => "create",
            ProductChange::Updated(_) => "update",
            ProductChange::Deleted(_) => "delete",
        }
    }
}

/// Durable home of the product collection.
///
/// `persist` receives both the full collection after the change and the
/// change itself: blob stores write the snapshot, document stores apply the
/// single change.
#[async_trait]
pub trait ProductStoreTrait {
    async fn fetch_all(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn persist(
        &self,
        snapshot: &[Product],
        change: ProductChange<'_>,
    ) -> Result<(), RepositoryError>;
    fn backend(&self) -> &'static str;
}
