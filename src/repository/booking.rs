use crate::domain::{Booking, ValidBooking};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

/// Lookup, create and delete operations for bookings.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// All bookings, ordered ascending by date.
    async fn find_all_ordered_by_date(&self) -> Result<Vec<Booking>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError>;
    /// The booking with the given natural key, if any.
    async fn find_by_natural_key(
        &self,
        customer_id: i64,
        flight_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Booking>, AppError>;
    /// All bookings belonging to one customer, ordered ascending by date.
    async fn find_by_customer(&self, customer_id: i64) -> Result<Vec<Booking>, AppError>;
    /// Persists the booking and returns it with its store-assigned id.
    async fn create(&self, new: &ValidBooking) -> Result<Booking, AppError>;
    /// Removes the booking. Returns false when no booking had the id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        PgBookingRepository { pool }
    }
}

const COLUMNS: &str = "id, customer_id, flight_id, date";

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn find_all_ordered_by_date(&self) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {COLUMNS} FROM booking ORDER BY date ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {COLUMNS} FROM booking WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(booking)
    }

    async fn find_by_natural_key(
        &self,
        customer_id: i64,
        flight_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {COLUMNS} FROM booking \
             WHERE customer_id = $1 AND flight_id = $2 AND date = $3 LIMIT 1"
        ))
        .bind(customer_id)
        .bind(flight_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(booking)
    }

    async fn find_by_customer(&self, customer_id: i64) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {COLUMNS} FROM booking WHERE customer_id = $1 ORDER BY date ASC, id ASC"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    async fn create(&self, new: &ValidBooking) -> Result<Booking, AppError> {
        tracing::debug!(
            customer_id = new.customer_id,
            flight_id = new.flight_id,
            "insert booking"
        );
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "INSERT INTO booking (customer_id, flight_id, date) \
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(new.customer_id)
        .bind(new.flight_id)
        .bind(new.date)
        .fetch_one(&self.pool)
        .await
        .map_err(super::map_unique_violation)?;
        Ok(booking)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let done = sqlx::query("DELETE FROM booking WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }
}
