//! Flight endpoints: list/lookup, read, create, delete.

use crate::domain::{Flight, NewFlight};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct FlightQuery {
    number: Option<String>,
}

/// GET /flights — all flights ordered by number; `?number=` looks one up
/// by its natural key (404 when absent).
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<FlightQuery>,
) -> Result<Response, AppError> {
    match query.number {
        Some(number) => {
            let flight = state.flights.find_by_number(&number).await?;
            Ok(Json(flight).into_response())
        }
        None => {
            let flights = state.flights.find_all().await?;
            Ok(Json(flights).into_response())
        }
    }
}

/// GET /flights/{id}
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Flight>, AppError> {
    Ok(Json(state.flights.find_by_id(id).await?))
}

/// POST /flights — 201 with the stored flight, including its generated id.
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewFlight>,
) -> Result<(StatusCode, Json<Flight>), AppError> {
    let flight = state.flights.create(new).await?;
    Ok((StatusCode::CREATED, Json(flight)))
}

/// DELETE /flights/{id} — 204 on success, 404 when the id is unknown.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if id < 0 {
        return Err(AppError::BadRequest("id must be a non-negative integer".into()));
    }
    state.flights.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
