//! Flightdesk: a flight booking REST backend over PostgreSQL.

pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod service;
pub mod state;

pub use config::Config;
pub use error::{AppError, FieldError};
pub use routes::{booking_routes, common_routes, customer_routes, flight_routes};
pub use schema::{apply_schema, ensure_database_exists};
pub use state::AppState;
