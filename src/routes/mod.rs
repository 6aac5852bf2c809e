//! Route construction: common routes plus one router per entity.

mod common;

pub use common::common_routes;

use crate::handlers::{booking, customer, flight};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn customer_routes(state: AppState) -> Router {
    Router::new()
        .route("/customers", get(customer::list).post(customer::create))
        .route(
            "/customers/:id",
            get(customer::read).delete(customer::delete),
        )
        .with_state(state)
}

pub fn flight_routes(state: AppState) -> Router {
    Router::new()
        .route("/flights", get(flight::list).post(flight::create))
        .route("/flights/:id", get(flight::read).delete(flight::delete))
        .with_state(state)
}

pub fn booking_routes(state: AppState) -> Router {
    Router::new()
        .route("/bookings", get(booking::list).post(booking::create))
        .route("/bookings/:id", get(booking::read).delete(booking::delete))
        .with_state(state)
}
