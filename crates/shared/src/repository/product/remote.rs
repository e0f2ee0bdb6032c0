use crate::{
    abstract_trait::{ProductChange, ProductStoreTrait},
    config::ConnectionPool,
    errors::RepositoryError,
    model::{Price, Product, ProductId},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::{error, info};

#[derive(Debug, FromRow)]
pub struct ProductRow {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub price: Option<f64>,
    pub store: String,
    pub description: String,
    pub purchased: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::new(row.id),
            name: row.name,
            price: Price::from_stored(row.price),
            store: row.store,
            description: row.description,
            purchased: row.purchased,
            owner_id: Some(row.owner_id),
            created_at: row.created_at,
        }
    }
}

/// Products in the shared `products` table, restricted to one owner.
pub struct RemoteProductRepository {
    db: ConnectionPool,
    owner_id: String,
}

impl RemoteProductRepository {
    pub fn new(db: ConnectionPool, owner_id: impl Into<String>) -> Self {
        Self {
            db,
            owner_id: owner_id.into(),
        }
    }

    async fn insert(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, owner_id, name, price, store, description, purchased, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(product.id.as_str())
        .bind(&self.owner_id)
        .bind(&product.name)
        .bind(product.price.amount())
        .bind(&product.store)
        .bind(&product.description)
        .bind(product.purchased)
        .bind(product.created_at)
        .execute(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product {}: {:?}", product.name, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created product ID {} ({})", product.id, product.name);
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $3,
                price = $4,
                store = $5,
                description = $6,
                purchased = $7
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(product.id.as_str())
        .bind(&self.owner_id)
        .bind(&product.name)
        .bind(product.price.amount())
        .bind(&product.store)
        .bind(&product.description)
        .bind(product.purchased)
        .execute(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product ID {}: {:?}", product.id, err);
            RepositoryError::from(err)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🔄 Updated product ID {}", product.id);
        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND owner_id = $2")
            .bind(id.as_str())
            .bind(&self.owner_id)
            .execute(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete product ID {}: {:?}", id, err);
                RepositoryError::from(err)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted product ID {}", id);
        Ok(())
    }
}

#[async_trait]
impl ProductStoreTrait for RemoteProductRepository {
    async fn fetch_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, owner_id, name, price, store, description, purchased, created_at
            FROM products
            WHERE owner_id = $1
            ORDER BY created_at DESC NULLS LAST
            "#,
        )
        .bind(&self.owner_id)
        .fetch_all(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch products for owner {}: {:?}", self.owner_id, err);
            RepositoryError::from(err)
        })?;

        info!("📦 Fetched {} products for owner {}", rows.len(), self.owner_id);
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn persist(
        &self,
        _snapshot: &[Product],
        change: ProductChange<'_>,
    ) -> Result<(), RepositoryError> {
        match change {
            ProductChange::Created(product) => self.insert(product).await,
            ProductChange::Updated(product) => self.update(product).await,
            ProductChange::Deleted(id) => self.delete(id).await,
        }
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_price_column_maps_to_unspecified() {
        let row = ProductRow {
            id: "1700000000000ab".into(),
            owner_id: "uid-1".into(),
            name: "Jajka".into(),
            price: None,
            store: "Żabka".into(),
            description: "Brak opisu".into(),
            purchased: true,
            created_at: None,
        };

        let product = Product::from(row);
        assert_eq!(product.price, Price::Unspecified);
        assert_eq!(product.owner_id.as_deref(), Some("uid-1"));
        assert!(product.purchased);
    }
}
