use crate::domain::{Customer, NewCustomer};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

/// Lookup, create and delete operations for customers.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers, ordered ascending by name.
    async fn find_all_ordered_by_name(&self) -> Result<Vec<Customer>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError>;
    /// First customer with the given email, if any.
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, AppError>;
    /// Persists the customer and returns it with its store-assigned id.
    async fn create(&self, new: &NewCustomer) -> Result<Customer, AppError>;
    /// Removes the customer and their bookings in one transaction.
    /// Returns false when no customer had the id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        PgCustomerRepository { pool }
    }
}

const COLUMNS: &str = "id, name, email, phone_number";

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn find_all_ordered_by_name(&self) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customer ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(customers)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customer WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(customer)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customer WHERE email = $1 LIMIT 1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(customer)
    }

    async fn create(&self, new: &NewCustomer) -> Result<Customer, AppError> {
        tracing::debug!(email = %new.email, "insert customer");
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "INSERT INTO customer (name, email, phone_number) \
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.phone_number)
        .fetch_one(&self.pool)
        .await
        .map_err(super::map_unique_violation)?;
        Ok(customer)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM booking WHERE customer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let done = sqlx::query("DELETE FROM customer WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(done.rows_affected() > 0)
    }
}
