//! Shared application state: one service per entity, all backed by one pool.

use crate::repository::{PgBookingRepository, PgCustomerRepository, PgFlightRepository};
use crate::service::{BookingService, CustomerService, FlightService};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Kept for the readiness probe.
    pub pool: PgPool,
    pub customers: Arc<CustomerService<PgCustomerRepository>>,
    pub flights: Arc<FlightService<PgFlightRepository>>,
    pub bookings:
        Arc<BookingService<PgBookingRepository, PgCustomerRepository, PgFlightRepository>>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        AppState {
            customers: Arc::new(CustomerService::new(PgCustomerRepository::new(pool.clone()))),
            flights: Arc::new(FlightService::new(PgFlightRepository::new(pool.clone()))),
            bookings: Arc::new(BookingService::new(
                PgBookingRepository::new(pool.clone()),
                PgCustomerRepository::new(pool.clone()),
                PgFlightRepository::new(pool.clone()),
            )),
            pool,
        }
    }
}
