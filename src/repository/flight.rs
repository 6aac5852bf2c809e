use crate::domain::{Flight, NewFlight};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

/// Lookup, create and delete operations for flights.
#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// All flights, ordered ascending by number.
    async fn find_all_ordered_by_number(&self) -> Result<Vec<Flight>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Flight>, AppError>;
    /// First flight with the given number, if any.
    async fn find_by_number(&self, number: &str) -> Result<Option<Flight>, AppError>;
    /// Persists the flight and returns it with its store-assigned id.
    async fn create(&self, new: &NewFlight) -> Result<Flight, AppError>;
    /// Removes the flight and its bookings in one transaction.
    /// Returns false when no flight had the id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

pub struct PgFlightRepository {
    pool: PgPool,
}

impl PgFlightRepository {
    pub fn new(pool: PgPool) -> Self {
        PgFlightRepository { pool }
    }
}

const COLUMNS: &str = "id, number, point_of_departure, destination";

#[async_trait]
impl FlightRepository for PgFlightRepository {
    async fn find_all_ordered_by_number(&self) -> Result<Vec<Flight>, AppError> {
        let flights = sqlx::query_as::<_, Flight>(&format!(
            "SELECT {COLUMNS} FROM flight ORDER BY number ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(flights)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Flight>, AppError> {
        let flight = sqlx::query_as::<_, Flight>(&format!(
            "SELECT {COLUMNS} FROM flight WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(flight)
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<Flight>, AppError> {
        let flight = sqlx::query_as::<_, Flight>(&format!(
            "SELECT {COLUMNS} FROM flight WHERE number = $1 LIMIT 1"
        ))
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(flight)
    }

    async fn create(&self, new: &NewFlight) -> Result<Flight, AppError> {
        tracing::debug!(number = %new.number, "insert flight");
        let flight = sqlx::query_as::<_, Flight>(&format!(
            "INSERT INTO flight (number, point_of_departure, destination) \
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(&new.number)
        .bind(&new.point_of_departure)
        .bind(&new.destination)
        .fetch_one(&self.pool)
        .await
        .map_err(super::map_unique_violation)?;
        Ok(flight)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM booking WHERE flight_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let done = sqlx::query("DELETE FROM flight WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(done.rows_affected() > 0)
    }
}
