//! Product repository backed by SQLite.

use crate::entity::Product;
use async_trait::async_trait;
use sqlx::SqlitePool;
use storefront::{Repository, StorageError};

type ProductRow = (String, String, f64, i32);

/// Repository for product rows.
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    /// Create a new product repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Product> for SqliteProductRepository {
    /// Insert as-is; an id already stored surfaces as [`StorageError::Constraint`].
    async fn save(&self, product: Product) -> Result<Product, StorageError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, quantity)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.quantity)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    async fn find_all(&self) -> Result<Vec<Product>, StorageError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, price, quantity
            FROM products
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_product).collect())
    }

    async fn find_by_id(&self, id: &String) -> Result<Option<Product>, StorageError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, price, quantity
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_product))
    }

    async fn count(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}

fn row_to_product((id, name, price, quantity): ProductRow) -> Product {
    Product {
        id,
        name,
        price,
        quantity,
    }
}
