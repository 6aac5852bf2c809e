//! Booking endpoints: list (optionally per customer), read, create, delete.

use crate::domain::{Booking, NewBooking};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    customer_id: Option<i64>,
}

/// GET /bookings — all bookings ordered by date; `?customerId=` narrows to
/// one customer's bookings (404 when the customer does not exist).
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<BookingQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = match query.customer_id {
        Some(customer_id) => state.bookings.find_by_customer(customer_id).await?,
        None => state.bookings.find_all().await?,
    };
    Ok(Json(bookings))
}

/// GET /bookings/{id}
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(state.bookings.find_by_id(id).await?))
}

/// POST /bookings — 201 with the stored booking, including its generated id.
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewBooking>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = state.bookings.create(new).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// DELETE /bookings/{id} — 204 on success, 404 when the id is unknown.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if id < 0 {
        return Err(AppError::BadRequest("id must be a non-negative integer".into()));
    }
    state.bookings.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
