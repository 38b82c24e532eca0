//! Customer repository backed by SQLite.

use crate::entity::Customer;
use async_trait::async_trait;
use sqlx::SqlitePool;
use storefront::{Repository, StorageError};

/// Repository for customer rows.
pub struct SqliteCustomerRepository {
    pool: SqlitePool,
}

impl SqliteCustomerRepository {
    /// Create a new customer repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Customer> for SqliteCustomerRepository {
    async fn save(&self, mut customer: Customer) -> Result<Customer, StorageError> {
        // No duplicate-email check: the same customer saved twice is two rows.
        let result = sqlx::query(
            r#"
            INSERT INTO customers (id, name, email)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .execute(&self.pool)
        .await?;

        if customer.id.is_none() {
            customer.id = Some(result.last_insert_rowid());
        }
        Ok(customer)
    }

    async fn find_all(&self) -> Result<Vec<Customer>, StorageError> {
        let rows = sqlx::query_as::<_, (i64, String, String)>(
            r#"
            SELECT id, name, email
            FROM customers
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_customer).collect())
    }

    async fn find_by_id(&self, id: &i64) -> Result<Option<Customer>, StorageError> {
        let row = sqlx::query_as::<_, (i64, String, String)>(
            r#"
            SELECT id, name, email
            FROM customers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_customer))
    }

    async fn count(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}

fn row_to_customer((id, name, email): (i64, String, String)) -> Customer {
    Customer {
        id: Some(id),
        name,
        email,
    }
}
