//! Customer endpoints: list/lookup, read, create, delete.

use crate::domain::{Customer, NewCustomer};
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
pub struct CustomerQuery {
    email: Option<String>,
}

/// GET /customers — all customers ordered by name; `?email=` looks one up
/// by their natural key (404 when absent).
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> Result<Response, AppError> {
    match query.email {
        Some(email) => {
            let customer = state.customers.find_by_email(&email).await?;
            Ok(Json(customer).into_response())
        }
        None => {
            let customers = state.customers.find_all().await?;
            Ok(Json(customers).into_response())
        }
    }
}

/// GET /customers/{id}
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Customer>, AppError> {
    Ok(Json(state.customers.find_by_id(id).await?))
}

/// POST /customers — 201 with the stored customer, including its generated id.
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewCustomer>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    let customer = state.customers.create(new).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// DELETE /customers/{id} — 204 on success, 404 when the id is unknown.
/// Dependent bookings are removed with the customer.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if id < 0 {
        return Err(AppError::BadRequest("id must be a non-negative integer".into()));
    }
    state.customers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
